//! In-Memory Library Catalog
//!
//! Books and members are owned by a [`Catalog`] registry which assigns
//! identifiers, answers lookups and searches, and enforces the lending
//! protocol (borrow/return). All state lives in memory for the lifetime of
//! the process.

pub mod domain;
pub use domain::{
    BlankField, Book, BookId, Catalog, Config, LoanError, Member, MemberId, NotFound,
};
