use std::{fmt, num::NonZeroUsize, str::FromStr};

use serde::Serialize;

/// Error returned when a string cannot be parsed as a catalog identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid id '{0}': expected a positive integer")]
pub struct ParseIdError(String);

/// Identifier of a [`Book`](crate::Book).
///
/// Assigned by the [`Catalog`](crate::Catalog) from a monotonic counter
/// starting at 1. Identifiers are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BookId(NonZeroUsize);

impl BookId {
    /// Create an identifier from a pre-validated non-zero index.
    #[must_use]
    pub const fn new(id: NonZeroUsize) -> Self {
        Self(id)
    }

    /// Returns the numeric value of the identifier.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Returns the underlying non-zero index.
    #[must_use]
    pub const fn index(self) -> NonZeroUsize {
        self.0
    }

    /// Returns a displayable representation padded to the specified digit
    /// width.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::NonZeroUsize;
    ///
    /// use biblio::BookId;
    ///
    /// let id = BookId::new(NonZeroUsize::new(7).unwrap());
    /// assert_eq!(id.display(3).to_string(), "007");
    /// assert_eq!(id.display(1).to_string(), "7");
    /// ```
    #[must_use]
    pub const fn display(self, digits: usize) -> PaddedId {
        PaddedId {
            id: self.0.get(),
            digits,
        }
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_index(s).map(Self)
    }
}

/// Identifier of a [`Member`](crate::Member).
///
/// Assigned by the [`Catalog`](crate::Catalog) from its own monotonic
/// counter, independent of the book counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MemberId(NonZeroUsize);

impl MemberId {
    /// Create an identifier from a pre-validated non-zero index.
    #[must_use]
    pub const fn new(id: NonZeroUsize) -> Self {
        Self(id)
    }

    /// Returns the numeric value of the identifier.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Returns the underlying non-zero index.
    #[must_use]
    pub const fn index(self) -> NonZeroUsize {
        self.0
    }

    /// Returns a displayable representation padded to the specified digit
    /// width.
    #[must_use]
    pub const fn display(self, digits: usize) -> PaddedId {
        PaddedId {
            id: self.0.get(),
            digits,
        }
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemberId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_index(s).map(Self)
    }
}

fn parse_index(s: &str) -> Result<NonZeroUsize, ParseIdError> {
    let value = s
        .trim()
        .parse::<usize>()
        .map_err(|_| ParseIdError(s.to_string()))?;
    NonZeroUsize::new(value).ok_or_else(|| ParseIdError(s.to_string()))
}

/// A wrapper type that formats an identifier with a specified digit width.
///
/// Returned by [`BookId::display`] and [`MemberId::display`]. Identifiers
/// wider than the requested width are not truncated.
#[derive(Debug, Clone, Copy)]
pub struct PaddedId {
    id: usize,
    digits: usize,
}

impl fmt::Display for PaddedId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:0width$}", self.id, width = self.digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;

    #[test]
    fn parses_positive_integer() {
        let id: BookId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);

        let id: MemberId = " 7 ".parse().unwrap();
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn rejects_zero() {
        let result = "0".parse::<BookId>();
        assert_eq!(result, Err(ParseIdError("0".to_string())));
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("abc".parse::<BookId>().is_err());
        assert!("".parse::<MemberId>().is_err());
        assert!("-3".parse::<MemberId>().is_err());
    }

    #[test_case(1, 3, "001"; "3 digits id 1")]
    #[test_case(42, 3, "042"; "3 digits id 42")]
    #[test_case(999, 3, "999"; "3 digits at boundary")]
    #[test_case(1000, 3, "1000"; "3 digits expansion")]
    #[test_case(5, 1, "5"; "no padding")]
    fn display_pads_to_width(id: usize, digits: usize, expected: &str) {
        let id = BookId::new(NonZeroUsize::new(id).unwrap());
        assert_eq!(id.display(digits).to_string(), expected);
    }

    #[test]
    fn error_display() {
        let error = ParseIdError("zero".to_string());
        assert_eq!(
            format!("{error}"),
            "invalid id 'zero': expected a positive integer"
        );
    }
}
