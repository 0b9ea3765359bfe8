//! The catalog registry.
//!
//! The [`Catalog`] owns every [`Book`] and [`Member`], is the sole authority
//! for id assignment, and implements the lending protocol. Borrow and return
//! each touch two entities jointly; the guards run before any mutation so a
//! rejected request never leaves partial state behind.

use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;
use nonempty::NonEmpty;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    book::Book,
    id::{BookId, MemberId},
    member::Member,
    views::{BookDetail, BookView, BorrowerRef, CatalogReport, LoanView, MemberDetail,
        MemberLoans, MemberView},
};

/// The owning registry of all books and members.
///
/// Collections are kept in insertion order, which is also listing order.
/// Lookups are linear scans; the catalog is sized for a console session, not
/// a warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
    members: Vec<Member>,
    /// Next book id. Monotonic, never reused.
    next_book: NonZeroUsize,
    /// Next member id. Independent of the book counter.
    next_member: NonZeroUsize,
}

/// Error returned when a required field is missing or blank.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} must not be blank")]
pub struct BlankField(&'static str);

/// Error returned when a referenced entity does not exist.
///
/// A reportable condition, never fatal: the caller renders it and carries
/// on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotFound {
    /// No book with the given id.
    #[error("book {0} not found")]
    Book(BookId),
    /// No member with the given id.
    #[error("member {0} not found")]
    Member(MemberId),
}

/// Errors that can occur when borrowing or returning a book.
///
/// The two domain rejections are expected user-input outcomes; neither
/// changes any state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanError {
    /// The book or member id does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFound),
    /// The book already has an active borrower.
    #[error("book {book} is already on loan to member {holder}")]
    AlreadyOnLoan {
        /// The requested book.
        book: BookId,
        /// The member currently holding it.
        holder: MemberId,
    },
    /// The returning member is not the recorded holder of the book.
    #[error("member {member} did not borrow book {book}")]
    NotBorrowed {
        /// The book being returned.
        book: BookId,
        /// The member attempting the return.
        member: MemberId,
    },
}

/// Result of a successful borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanReceipt {
    /// The borrowed book.
    pub book: BookId,
    /// The book's title at borrow time.
    pub title: String,
    /// The borrowing member.
    pub member: MemberId,
    /// The member's name at borrow time.
    pub member_name: String,
    /// When the loan was made.
    pub borrowed_at: DateTime<Utc>,
}

/// Result of a successful return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    /// The returned book.
    pub book: BookId,
    /// The book's title.
    pub title: String,
    /// The member who returned it.
    pub member: MemberId,
    /// The member's name.
    pub member_name: String,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            books: Vec::new(),
            members: Vec::new(),
            next_book: NonZeroUsize::MIN,
            next_member: NonZeroUsize::MIN,
        }
    }

    /// Adds a book, assigning the next book id.
    ///
    /// Title and author are trimmed; blank fields are refused.
    ///
    /// # Errors
    ///
    /// Returns [`BlankField`] if the title or author is empty or
    /// whitespace-only.
    pub fn add_book(&mut self, title: &str, author: &str) -> Result<BookId, BlankField> {
        let title = non_blank("title", title)?;
        let author = non_blank("author", author)?;

        let id = BookId::new(self.next_book);
        self.next_book = self.next_book.checked_add(1).expect("book id overflow!");
        self.books.push(Book::new(id, title, author));

        tracing::debug!(%id, "added book");
        Ok(id)
    }

    /// Registers a member, assigning the next member id.
    ///
    /// # Errors
    ///
    /// Returns [`BlankField`] if the name is empty or whitespace-only.
    pub fn add_member(&mut self, name: &str) -> Result<MemberId, BlankField> {
        let name = non_blank("name", name)?;

        let id = MemberId::new(self.next_member);
        self.next_member = self.next_member.checked_add(1).expect("member id overflow!");
        self.members.push(Member::new(id, name));

        tracing::debug!(%id, "registered member");
        Ok(id)
    }

    /// Updates a book's title and/or author.
    ///
    /// `None` or a blank string means "keep the current value". Returns
    /// whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if the book id does not exist.
    pub fn edit_book(
        &mut self,
        id: BookId,
        new_title: Option<&str>,
        new_author: Option<&str>,
    ) -> Result<bool, NotFound> {
        let index = self.book_index(id)?;

        let mut changed = false;
        if let Some(title) = normalized(new_title) {
            self.books[index].set_title(title);
            changed = true;
        }
        if let Some(author) = normalized(new_author) {
            self.books[index].set_author(author);
            changed = true;
        }
        Ok(changed)
    }

    /// Updates a member's name.
    ///
    /// `None` or a blank string means "keep the current value". Returns
    /// whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if the member id does not exist.
    pub fn edit_member(&mut self, id: MemberId, new_name: Option<&str>) -> Result<bool, NotFound> {
        let index = self.member_index(id)?;

        if let Some(name) = normalized(new_name) {
            self.members[index].set_name(name);
            return Ok(true);
        }
        Ok(false)
    }

    /// Finds a book by id.
    #[must_use]
    pub fn book(&self, id: BookId) -> Option<BookView<'_>> {
        self.book_entity(id).map(|book| self.book_view(book))
    }

    /// Finds a member by id.
    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<MemberView<'_>> {
        self.members
            .iter()
            .find(|member| member.id() == id)
            .map(member_view)
    }

    /// Returns all books in catalog insertion order.
    pub fn books(&self) -> impl Iterator<Item = BookView<'_>> + '_ {
        self.books.iter().map(|book| self.book_view(book))
    }

    /// Returns all members in catalog insertion order.
    pub fn members(&self) -> impl Iterator<Item = MemberView<'_>> + '_ {
        self.members.iter().map(member_view)
    }

    /// The number of books in the catalog.
    #[must_use]
    pub const fn book_count(&self) -> usize {
        self.books.len()
    }

    /// The number of registered members.
    #[must_use]
    pub const fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Searches books by case-insensitive substring match against title or
    /// author.
    ///
    /// Matches are returned in catalog insertion order. No match is an empty
    /// vector, not an error.
    #[must_use]
    pub fn search_books(&self, keyword: &str) -> Vec<BookView<'_>> {
        let needle = keyword.to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                book.title().to_lowercase().contains(&needle)
                    || book.author().to_lowercase().contains(&needle)
            })
            .map(|book| self.book_view(book))
            .collect()
    }

    /// Returns a book's borrow history, oldest first.
    ///
    /// Member names are resolved at view time, so a renamed member shows
    /// their current name.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if the book id does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the history references a member missing from the catalog
    /// (members are never removed, so this indicates a corrupted catalog).
    pub fn history(&self, id: BookId) -> Result<Vec<LoanView<'_>>, NotFound> {
        let book = self.book_entity(id).ok_or(NotFound::Book(id))?;
        Ok(book
            .history()
            .iter()
            .map(|loan| LoanView {
                member: loan.member(),
                name: self.member_name(loan.member()),
                borrowed_at: loan.borrowed_at(),
            })
            .collect())
    }

    /// Returns every member currently holding at least one book, with the
    /// held books, in catalog insertion order.
    ///
    /// # Panics
    ///
    /// Panics if a member's loan list references a book missing from the
    /// catalog (books are never removed, so this indicates a corrupted
    /// catalog).
    #[must_use]
    pub fn members_with_loans(&self) -> Vec<MemberLoans<'_>> {
        self.members
            .iter()
            .filter_map(|member| {
                let books: Vec<BookView<'_>> = member
                    .borrowed_books()
                    .iter()
                    .map(|&id| {
                        let book = self
                            .book_entity(id)
                            .unwrap_or_else(|| panic!("book {id} missing from catalog"));
                        self.book_view(book)
                    })
                    .collect();
                NonEmpty::from_vec(books).map(|books| MemberLoans {
                    member: member_view(member),
                    books,
                })
            })
            .collect()
    }

    /// Returns a serializable snapshot of the whole catalog.
    ///
    /// # Panics
    ///
    /// Panics if loan records reference a member missing from the catalog.
    #[must_use]
    pub fn report(&self) -> CatalogReport<'_> {
        let books = self
            .books
            .iter()
            .map(|book| BookDetail {
                id: book.id(),
                title: book.title(),
                author: book.author(),
                available: book.is_available(),
                borrower: book.borrower().map(|id| self.borrower_ref(id)),
                history: book
                    .history()
                    .iter()
                    .map(|loan| LoanView {
                        member: loan.member(),
                        name: self.member_name(loan.member()),
                        borrowed_at: loan.borrowed_at(),
                    })
                    .collect(),
                added: book.created(),
            })
            .collect();

        let members = self
            .members
            .iter()
            .map(|member| MemberDetail {
                id: member.id(),
                name: member.name(),
                borrowed: member.borrowed_books(),
                registered: member.created(),
            })
            .collect();

        CatalogReport { books, members }
    }

    /// Borrow a book for a member.
    ///
    /// On success the book's borrower is set, the loan is appended to the
    /// book's history, and the book is added to the member's held list — as
    /// one transition with no externally observable intermediate state.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::NotFound`] when either id is unknown, or
    /// [`LoanError::AlreadyOnLoan`] when the book has an active borrower.
    /// Rejections change no state.
    #[instrument(skip(self))]
    pub fn borrow(&mut self, book: BookId, member: MemberId) -> Result<LoanReceipt, LoanError> {
        let book_index = self.book_index(book)?;
        let member_index = self.member_index(member)?;

        if let Some(holder) = self.books[book_index].borrower() {
            return Err(LoanError::AlreadyOnLoan { book, holder });
        }

        let borrowed_at = Utc::now();
        self.books[book_index].mark_borrowed(member, borrowed_at);
        self.members[member_index].record_loan(book);

        tracing::debug!(%book, %member, "book borrowed");
        Ok(LoanReceipt {
            book,
            title: self.books[book_index].title().to_string(),
            member,
            member_name: self.members[member_index].name().to_string(),
            borrowed_at,
        })
    }

    /// Return a book previously borrowed by a member.
    ///
    /// The guard is keyed on the *member's* record: only the member recorded
    /// as currently holding the book may return it, even if the book happens
    /// to be on loan to somebody else.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::NotFound`] when either id is unknown, or
    /// [`LoanError::NotBorrowed`] when the member does not hold the book.
    /// Rejections change no state.
    #[instrument(skip(self))]
    pub fn return_book(
        &mut self,
        book: BookId,
        member: MemberId,
    ) -> Result<ReturnReceipt, LoanError> {
        let book_index = self.book_index(book)?;
        let member_index = self.member_index(member)?;

        if !self.members[member_index].clear_loan(book) {
            return Err(LoanError::NotBorrowed { book, member });
        }
        self.books[book_index].mark_returned();

        tracing::debug!(%book, %member, "book returned");
        Ok(ReturnReceipt {
            book,
            title: self.books[book_index].title().to_string(),
            member,
            member_name: self.members[member_index].name().to_string(),
        })
    }
}

impl Catalog {
    fn book_entity(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id() == id)
    }

    fn book_index(&self, id: BookId) -> Result<usize, NotFound> {
        self.books
            .iter()
            .position(|book| book.id() == id)
            .ok_or(NotFound::Book(id))
    }

    fn member_index(&self, id: MemberId) -> Result<usize, NotFound> {
        self.members
            .iter()
            .position(|member| member.id() == id)
            .ok_or(NotFound::Member(id))
    }

    fn member_name(&self, id: MemberId) -> &str {
        self.members
            .iter()
            .find(|member| member.id() == id)
            .map_or_else(|| panic!("member {id} missing from catalog"), Member::name)
    }

    fn borrower_ref(&self, id: MemberId) -> BorrowerRef<'_> {
        BorrowerRef {
            id,
            name: self.member_name(id),
        }
    }

    fn book_view<'a>(&'a self, book: &'a Book) -> BookView<'a> {
        BookView {
            id: book.id(),
            title: book.title(),
            author: book.author(),
            borrower: book.borrower().map(|id| self.borrower_ref(id)),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn member_view(member: &Member) -> MemberView<'_> {
    MemberView {
        id: member.id(),
        name: member.name(),
    }
}

fn non_blank(field: &'static str, value: &str) -> Result<NonEmptyString, BlankField> {
    NonEmptyString::new(value.trim().to_string()).map_err(|_| BlankField(field))
}

/// Trims an optional edit field; blank or absent means "keep current".
fn normalized(field: Option<&str>) -> Option<NonEmptyString> {
    field.and_then(|value| NonEmptyString::new(value.trim().to_string()).ok())
}
