use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;

use crate::domain::id::{BookId, MemberId};

/// A catalog item with availability state and borrow history.
///
/// A book is either on the shelf or on loan to exactly one member. The
/// current holder is tracked by id; availability is simply the absence of a
/// holder, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    title: NonEmptyString,
    author: NonEmptyString,
    /// Current holder. `None` means the book is on the shelf.
    borrower: Option<MemberId>,
    /// Every successful borrow, oldest first. Append-only.
    history: Vec<Loan>,
    created: DateTime<Utc>,
}

/// A single successful borrow recorded in a book's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loan {
    member: MemberId,
    borrowed_at: DateTime<Utc>,
}

impl Loan {
    /// The member who borrowed the book.
    #[must_use]
    pub const fn member(&self) -> MemberId {
        self.member
    }

    /// When the loan was made.
    #[must_use]
    pub const fn borrowed_at(&self) -> DateTime<Utc> {
        self.borrowed_at
    }
}

impl Book {
    /// Construct a new [`Book`] from pre-validated fields.
    ///
    /// Field validation and id assignment happen at the
    /// [`Catalog`](crate::Catalog) boundary; this constructor is infallible.
    #[must_use]
    pub(crate) fn new(id: BookId, title: NonEmptyString, author: NonEmptyString) -> Self {
        Self {
            id,
            title,
            author,
            borrower: None,
            history: Vec::new(),
            created: Utc::now(),
        }
    }

    /// The catalog-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> BookId {
        self.id
    }

    /// The book's title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// The book's author.
    #[must_use]
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Whether the book is on the shelf (no active borrower).
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.borrower.is_none()
    }

    /// The member currently holding the book, if any.
    #[must_use]
    pub const fn borrower(&self) -> Option<MemberId> {
        self.borrower
    }

    /// Every successful borrow of this book, oldest first.
    ///
    /// A member appears once per borrow, so repeat borrowers appear multiple
    /// times. The sequence never shrinks.
    #[must_use]
    pub fn history(&self) -> &[Loan] {
        &self.history
    }

    /// When the book was added to the catalog.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub(crate) fn set_title(&mut self, title: NonEmptyString) {
        self.title = title;
    }

    pub(crate) fn set_author(&mut self, author: NonEmptyString) {
        self.author = author;
    }

    /// Record a borrow. Inner half of the lending protocol: the caller must
    /// already have verified the book is available.
    pub(crate) fn mark_borrowed(&mut self, member: MemberId, at: DateTime<Utc>) {
        debug_assert!(
            self.borrower.is_none(),
            "mark_borrowed called on a book that is already on loan"
        );
        self.borrower = Some(member);
        self.history.push(Loan {
            member,
            borrowed_at: at,
        });
    }

    /// Record a return. The caller must already have verified the book is on
    /// loan to the returning member.
    pub(crate) fn mark_returned(&mut self) {
        debug_assert!(
            self.borrower.is_some(),
            "mark_returned called on a book that is not on loan"
        );
        self.borrower = None;
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn book() -> Book {
        Book::new(
            BookId::new(NonZeroUsize::MIN),
            NonEmptyString::new("Dune".to_string()).unwrap(),
            NonEmptyString::new("Herbert".to_string()).unwrap(),
        )
    }

    fn member_id(id: usize) -> MemberId {
        MemberId::new(NonZeroUsize::new(id).unwrap())
    }

    #[test]
    fn new_book_is_available_with_empty_history() {
        let book = book();
        assert!(book.is_available());
        assert_eq!(book.borrower(), None);
        assert!(book.history().is_empty());
    }

    #[test]
    fn mark_borrowed_sets_holder_and_appends_history() {
        let mut book = book();
        let at = Utc::now();

        book.mark_borrowed(member_id(1), at);

        assert!(!book.is_available());
        assert_eq!(book.borrower(), Some(member_id(1)));
        assert_eq!(book.history().len(), 1);
        assert_eq!(book.history()[0].member(), member_id(1));
        assert_eq!(book.history()[0].borrowed_at(), at);
    }

    #[test]
    fn mark_returned_clears_holder_but_keeps_history() {
        let mut book = book();
        book.mark_borrowed(member_id(1), Utc::now());

        book.mark_returned();

        assert!(book.is_available());
        assert_eq!(book.borrower(), None);
        assert_eq!(book.history().len(), 1);
    }

    #[test]
    fn repeat_borrower_appears_once_per_loan() {
        let mut book = book();
        book.mark_borrowed(member_id(2), Utc::now());
        book.mark_returned();
        book.mark_borrowed(member_id(2), Utc::now());

        let members: Vec<_> = book.history().iter().map(Loan::member).collect();
        assert_eq!(members, vec![member_id(2), member_id(2)]);
    }
}
