//! # Book Routes

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::store::LibraryGateway;

use super::handlers::{create_book, delete_book, fetch_books, get_book, update_book};

/// State shared by the book handlers.
///
/// Holds the only process-wide resource, the store connection.
#[derive(Debug, Clone)]
pub struct AppState {
    pub library: LibraryGateway,
}

impl AppState {
    pub fn new(library: LibraryGateway) -> Self {
        Self { library }
    }
}

/// Create book routes
pub fn book_routes(state: AppState) -> Router {
    Router::new()
        .route("/createBook", post(create_book))
        .route("/fetchBooks", get(fetch_books))
        .route("/deleteBook", delete(delete_book))
        .route("/updateBook", put(update_book))
        .route("/getBook", get(get_book))
        .with_state(state)
}
