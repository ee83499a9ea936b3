//! # Request Validation
//!
//! Pure checks run before anything is written. Raw payloads keep every
//! field as an untyped JSON value so that a wrong type and a missing field
//! can be told apart; validation turns them into typed records.
//!
//! Checks run in a fixed order and stop at the first failure, so the
//! error a caller sees for a malformed payload is deterministic.

mod errors;
mod payload;
mod rules;

pub use errors::{ValidationError, ValidationResult};
pub use payload::{
    isbn_from_query, BookDetails, BookIdentity, CreateBookPayload, UpdateBookPayload,
};
