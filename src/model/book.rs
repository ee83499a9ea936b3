//! # Book Record

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::author::{AuthorId, AuthorSummary};

/// Longest ISBN accepted on creation.
///
/// Hyphenated ISBN-13 fits with room to spare.
pub const MAX_ISBN_LENGTH: usize = 26;

/// Store-assigned book identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub Uuid);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,

    /// Non-owning reference; several books may share one author
    pub author: AuthorId,

    pub price: f64,

    /// Unique across all books
    pub isbn: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    pub number_of_pages: u32,
    pub publisher: String,
}

/// A book that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: AuthorId,
    pub price: f64,
    pub isbn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub number_of_pages: u32,
    pub publisher: String,
}

/// Replacement values for the mutable fields of a book.
///
/// Every field is written on update. A `None` language clears the stored
/// language; there is no merge with the previous record.
#[derive(Debug, Clone, PartialEq)]
pub struct BookUpdate {
    pub title: String,
    pub price: f64,
    pub language: Option<String>,
    pub publisher: String,
}

/// A book with its author reference resolved, as returned by the listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListing {
    pub id: BookId,
    pub title: String,

    /// `None` when the referenced author no longer exists
    pub author: Option<AuthorSummary>,

    pub price: f64,
    pub isbn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub number_of_pages: u32,
    pub publisher: String,
}

impl BookListing {
    pub fn new(book: Book, author: Option<AuthorSummary>) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author,
            price: book.price,
            isbn: book.isbn,
            language: book.language,
            number_of_pages: book.number_of_pages,
            publisher: book.publisher,
        }
    }
}
