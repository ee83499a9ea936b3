//! # Library Records
//!
//! Books and the authors they reference. Records are plain data; the
//! store owns identifiers and the handlers own the lifecycle rules.

pub mod author;
pub mod book;

pub use author::{Author, AuthorId, AuthorSummary, NewAuthor, MINIMUM_AUTHOR_AGE_YEARS};
pub use book::{Book, BookId, BookListing, BookUpdate, NewBook, MAX_ISBN_LENGTH};
