//! # REST API Errors
//!
//! Every failure a handler can report. Client errors carry their own
//! message; internal errors carry a fixed per-endpoint message and keep
//! the underlying cause for the server log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;
use crate::validation::ValidationError;

use super::response::ErrorResponse;

/// Result type for REST handlers
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// A field failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body is not a JSON object
    #[error("Request body must be a JSON object!")]
    MalformedBody,

    /// A book with this ISBN already exists
    #[error("Book is already in the database!")]
    DuplicateBook,

    /// No book with the requested ISBN
    #[error("Book not found!")]
    BookNotFound,

    /// No route for this path
    #[error("Route not found!")]
    RouteNotFound,

    /// The path exists but not for this method
    #[error("Method not allowed!")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// The author of a new book could not be stored
    #[error("Failed to create author!")]
    AuthorCreation(#[source] StoreError),

    /// Any other store failure
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::MalformedBody => StatusCode::BAD_REQUEST,
            RestError::DuplicateBook => StatusCode::BAD_REQUEST,

            // 404 Not Found
            RestError::BookNotFound => StatusCode::NOT_FOUND,
            RestError::RouteNotFound => StatusCode::NOT_FOUND,

            // 405 Method Not Allowed
            RestError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            // 500 Internal Server Error
            RestError::AuthorCreation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wrap a store failure under a fixed client-facing message
    pub fn internal(message: &'static str) -> impl FnOnce(StoreError) -> RestError {
        move |source| RestError::Internal { message, source }
    }

    fn cause(&self) -> Option<&StoreError> {
        match self {
            RestError::AuthorCreation(source) => Some(source),
            RestError::Internal { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Some(cause) = self.cause() {
            error!(status = status.as_u16(), error = %self, cause = %cause, "request failed");
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::from(ValidationError::MissingTitle).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(RestError::DuplicateBook.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RestError::BookNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            RestError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            RestError::AuthorCreation(StoreError::Poisoned).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = RestError::from(ValidationError::IsbnTooLong);
        assert_eq!(err.to_string(), "Invalid ISBN number!");
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let err = RestError::internal("Unexpected error creating book!")(StoreError::Io(
            "disk full".to_string(),
        ));

        let body = ErrorResponse::from(&err);
        assert_eq!(body.error, "Unexpected error creating book!");
        assert!(!body.error.contains("disk full"));
    }
}
