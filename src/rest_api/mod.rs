//! # Book REST API
//!
//! Five endpoints over books, with authors managed implicitly:
//!
//! - `POST /createBook` - create a book, finding or creating its author
//! - `GET /fetchBooks` - list books with author names
//! - `DELETE /deleteBook?isbn=` - delete a book, and its author if orphaned
//! - `PUT /updateBook` - replace title, price, language and publisher
//! - `GET /getBook?isbn=` - fetch one book
//!
//! Every error body is `{"error": "<message>"}`.

pub mod errors;
pub mod handlers;
pub mod response;
pub mod routes;

pub use errors::{RestError, RestResult};
pub use response::{ErrorResponse, FetchedBookResponse, MessageResponse};
pub use routes::{book_routes, AppState};
