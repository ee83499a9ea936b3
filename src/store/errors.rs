//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    // ==================
    // Write rejections
    // ==================
    /// A unique field already holds this value
    #[error("Duplicate key in {collection}: {field} = {value}")]
    DuplicateKey {
        collection: String,
        field: String,
        value: String,
    },

    /// A record failed its schema constraints
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Only JSON objects can be stored
    #[error("Document must be a JSON object")]
    NotAnObject,

    // ==================
    // Connection
    // ==================
    /// Connection string names a backend that does not exist
    #[error("Unsupported store scheme: {0}")]
    UnsupportedScheme(String),

    /// Backend could not be opened
    #[error("Connection failed: {0}")]
    Connection(String),

    // ==================
    // Backend failures
    // ==================
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Whether the error is a unique-field violation
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
