//! Validation errors
//!
//! The display text of each variant is returned verbatim to the client.

use thiserror::Error;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    // ==================
    // Book creation
    // ==================
    #[error("Title must be provided and must be string!")]
    MissingTitle,

    #[error("Author name is required and must be string!")]
    MissingAuthorName,

    #[error("Author country name should be between 4 and 56 characters and must be string!")]
    InvalidAuthorCountry,

    #[error("Author birth date is required and must be 'YYYY-MM-DD' format !")]
    InvalidAuthorBirthDate,

    #[error("Price must be greater than 0 and must be integer!")]
    InvalidPrice,

    #[error("Invalid ISBN number!")]
    IsbnTooLong,

    #[error("Unique ISBN number is required and must be string!")]
    MissingIsbn,

    #[error("Number of pages must be greater than 0 and integer!")]
    InvalidNumberOfPages,

    #[error("Publisher name must be string and not empty!")]
    MissingPublisher,

    // ==================
    // Lookup, update and delete
    // ==================
    /// ISBN used to address an existing book is missing or not text
    #[error("ISBN is required and must be a string!")]
    MissingTargetIsbn,

    #[error("Title must be string and longer than 0 characters.")]
    InvalidUpdatedTitle,

    #[error("Price must be integer and greater than 0.")]
    InvalidUpdatedPrice,

    #[error("Publisher name must be string and must not be empty.")]
    InvalidUpdatedPublisher,
}
