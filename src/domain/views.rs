//! Read-only projections of catalog state.
//!
//! Views are plain structured data: rendering (tables, colors, JSON) is the
//! caller's concern. Borrowed views are constructed on demand by the
//! [`Catalog`](crate::Catalog) with member names resolved at view time, so a
//! renamed member shows their current name everywhere.

use chrono::{DateTime, Utc};
use nonempty::NonEmpty;
use serde::Serialize;

use crate::domain::id::{BookId, MemberId};

/// A book as presented to callers: identity, attribution, and who (if
/// anyone) currently holds it.
#[derive(Debug, Clone, Serialize)]
pub struct BookView<'a> {
    /// Catalog-assigned identifier.
    pub id: BookId,
    /// Title.
    pub title: &'a str,
    /// Author.
    pub author: &'a str,
    /// The current holder, or `None` when the book is on the shelf.
    pub borrower: Option<BorrowerRef<'a>>,
}

impl BookView<'_> {
    /// Whether the book is on the shelf.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.borrower.is_none()
    }
}

/// Reference to the member holding a book.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BorrowerRef<'a> {
    /// The holder's identifier.
    pub id: MemberId,
    /// The holder's current name.
    pub name: &'a str,
}

/// A member as presented to callers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MemberView<'a> {
    /// Catalog-assigned identifier.
    pub id: MemberId,
    /// The member's current name.
    pub name: &'a str,
}

/// One entry of a book's borrow history.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LoanView<'a> {
    /// The borrowing member's identifier.
    pub member: MemberId,
    /// The borrowing member's current name.
    pub name: &'a str,
    /// When the loan was made.
    pub borrowed_at: DateTime<Utc>,
}

/// A member together with the books they currently hold.
///
/// Only produced for members holding at least one book; the non-emptiness is
/// part of the type.
#[derive(Debug, Clone, Serialize)]
pub struct MemberLoans<'a> {
    /// The member.
    pub member: MemberView<'a>,
    /// The held books, in borrow order.
    pub books: NonEmpty<BookView<'a>>,
}

/// Full serializable snapshot of the catalog, for export.
///
/// A display projection only: the snapshot is written out, never read back.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport<'a> {
    /// Every book, in catalog insertion order.
    pub books: Vec<BookDetail<'a>>,
    /// Every member, in catalog insertion order.
    pub members: Vec<MemberDetail<'a>>,
}

/// A book with its full borrow history, as exported in a [`CatalogReport`].
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail<'a> {
    /// Catalog-assigned identifier.
    pub id: BookId,
    /// Title.
    pub title: &'a str,
    /// Author.
    pub author: &'a str,
    /// Whether the book is on the shelf.
    pub available: bool,
    /// The current holder, or `None` when available.
    pub borrower: Option<BorrowerRef<'a>>,
    /// Every successful borrow, oldest first.
    pub history: Vec<LoanView<'a>>,
    /// When the book was added to the catalog.
    pub added: DateTime<Utc>,
}

/// A member with their held books, as exported in a [`CatalogReport`].
#[derive(Debug, Clone, Serialize)]
pub struct MemberDetail<'a> {
    /// Catalog-assigned identifier.
    pub id: MemberId,
    /// The member's current name.
    pub name: &'a str,
    /// Ids of the books currently held, in borrow order.
    pub borrowed: &'a [BookId],
    /// When the member was registered.
    pub registered: DateTime<Utc>,
}
