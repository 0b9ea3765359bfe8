use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;

use crate::domain::id::{BookId, MemberId};

/// A library patron.
///
/// Tracks the books the member currently holds, by id and in the order they
/// were borrowed. A book appears at most once: borrowing a held book is
/// rejected upstream because the book is already unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: MemberId,
    name: NonEmptyString,
    borrowed: Vec<BookId>,
    created: DateTime<Utc>,
}

impl Member {
    /// Construct a new [`Member`] from pre-validated fields.
    ///
    /// Name validation and id assignment happen at the
    /// [`Catalog`](crate::Catalog) boundary; this constructor is infallible.
    #[must_use]
    pub(crate) fn new(id: MemberId, name: NonEmptyString) -> Self {
        Self {
            id,
            name,
            borrowed: Vec::new(),
            created: Utc::now(),
        }
    }

    /// The catalog-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// The member's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The books currently held, in borrow order.
    #[must_use]
    pub fn borrowed_books(&self) -> &[BookId] {
        &self.borrowed
    }

    /// Whether the member currently holds the given book.
    #[must_use]
    pub fn has_borrowed(&self, book: BookId) -> bool {
        self.borrowed.contains(&book)
    }

    /// When the member was registered.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub(crate) fn set_name(&mut self, name: NonEmptyString) {
        self.name = name;
    }

    /// Record a loan. Inner half of the lending protocol: the caller must
    /// already have verified the book is available (and therefore not held
    /// by this member).
    pub(crate) fn record_loan(&mut self, book: BookId) {
        debug_assert!(
            !self.borrowed.contains(&book),
            "record_loan called for a book the member already holds"
        );
        self.borrowed.push(book);
    }

    /// Remove a loan, returning whether the member actually held the book.
    pub(crate) fn clear_loan(&mut self, book: BookId) -> bool {
        if let Some(position) = self.borrowed.iter().position(|&held| held == book) {
            self.borrowed.remove(position);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn member() -> Member {
        Member::new(
            MemberId::new(NonZeroUsize::MIN),
            NonEmptyString::new("Ada".to_string()).unwrap(),
        )
    }

    fn book_id(id: usize) -> BookId {
        BookId::new(NonZeroUsize::new(id).unwrap())
    }

    #[test]
    fn new_member_holds_nothing() {
        let member = member();
        assert!(member.borrowed_books().is_empty());
        assert!(!member.has_borrowed(book_id(1)));
    }

    #[test]
    fn record_loan_preserves_borrow_order() {
        let mut member = member();
        member.record_loan(book_id(3));
        member.record_loan(book_id(1));

        assert_eq!(member.borrowed_books(), &[book_id(3), book_id(1)]);
        assert!(member.has_borrowed(book_id(3)));
    }

    #[test]
    fn clear_loan_removes_only_the_given_book() {
        let mut member = member();
        member.record_loan(book_id(3));
        member.record_loan(book_id(1));

        assert!(member.clear_loan(book_id(3)));
        assert_eq!(member.borrowed_books(), &[book_id(1)]);
    }

    #[test]
    fn clear_loan_reports_books_never_held() {
        let mut member = member();
        assert!(!member.clear_loan(book_id(9)));
    }
}
