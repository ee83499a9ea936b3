//! # Book Handlers
//!
//! Each handler validates, performs its store calls and answers. The first
//! failed check answers the request; nothing after it runs.
//!
//! Creating a book with a new author is two writes with no transaction
//! around them. If the book insert fails, the author stays behind with no
//! books.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

use crate::model::{Book, BookListing};
use crate::validation::{isbn_from_query, CreateBookPayload, UpdateBookPayload};

use super::errors::{RestError, RestResult};
use super::response::{FetchedBookResponse, MessageResponse};
use super::routes::AppState;

const CREATE_FAILED: &str = "Unexpected error creating book!";
const FETCH_FAILED: &str = "Unexpected error occurred while fetching books!";
const DELETE_FAILED: &str = "Unexpected error occurred while deleting the book!";
const UPDATE_FAILED: &str = "Unexpected error occurred while updating book!";
const GET_FAILED: &str = "Unexpected error occurred retrieving the book!";

type IsbnQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn query_params(query: IsbnQuery) -> Vec<(String, String)> {
    query.map(|Query(params)| params).unwrap_or_default()
}

/// `POST /createBook`
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<CreateBookPayload>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Book>)> {
    let Json(payload) = body.map_err(|_| RestError::MalformedBody)?;
    let library = &state.library;

    let identity = payload.validate_identity()?;

    if let Some(isbn) = payload.isbn_text() {
        let existing = library
            .find_book_by_isbn(isbn)
            .await
            .map_err(RestError::internal(CREATE_FAILED))?;
        if existing.is_some() {
            return Err(RestError::DuplicateBook);
        }
    }

    let found = library
        .find_author_by_name(&identity.author.name)
        .await
        .map_err(RestError::internal(CREATE_FAILED))?;
    let author = match found {
        Some(author) => author,
        None => library
            .create_author(&identity.author)
            .await
            .map_err(RestError::AuthorCreation)?,
    };

    let details = payload.validate_details()?;
    let book = library
        .create_book(&details.into_new_book(identity.title, author.id))
        .await
        .map_err(|e| {
            if e.is_duplicate_key() {
                RestError::DuplicateBook
            } else {
                RestError::internal(CREATE_FAILED)(e)
            }
        })?;

    info!(isbn = %book.isbn, book_id = %book.id, author_id = %author.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// `GET /fetchBooks`
pub async fn fetch_books(State(state): State<AppState>) -> RestResult<Json<Vec<BookListing>>> {
    let books = state
        .library
        .list_books_with_authors()
        .await
        .map_err(RestError::internal(FETCH_FAILED))?;

    debug!(count = books.len(), "books listed");
    Ok(Json(books))
}

/// `DELETE /deleteBook?isbn=...`
///
/// Removes the author too when this was their last book.
pub async fn delete_book(
    State(state): State<AppState>,
    query: IsbnQuery,
) -> RestResult<Json<MessageResponse>> {
    let params = query_params(query);
    let isbn = isbn_from_query(&params)?;
    let library = &state.library;

    let book = library
        .delete_book_by_isbn(isbn)
        .await
        .map_err(RestError::internal(DELETE_FAILED))?
        .ok_or(RestError::BookNotFound)?;
    info!(isbn = %book.isbn, book_id = %book.id, "book deleted");

    let remaining = library
        .count_books_by_author(book.author)
        .await
        .map_err(RestError::internal(DELETE_FAILED))?;
    if remaining == 0 {
        library
            .delete_author(book.author)
            .await
            .map_err(RestError::internal(DELETE_FAILED))?;
        info!(author_id = %book.author, "author removed with their last book");
    }

    Ok(Json(MessageResponse::new("Book deleted successfully.")))
}

/// `PUT /updateBook`
///
/// Replaces title, price, language and publisher. All four are written
/// every time; an omitted language is cleared.
pub async fn update_book(
    State(state): State<AppState>,
    body: Result<Json<UpdateBookPayload>, JsonRejection>,
) -> RestResult<Json<MessageResponse>> {
    let Json(payload) = body.map_err(|_| RestError::MalformedBody)?;
    let isbn = payload.target_isbn()?;
    let library = &state.library;

    library
        .find_book_by_isbn(isbn)
        .await
        .map_err(RestError::internal(UPDATE_FAILED))?
        .ok_or(RestError::BookNotFound)?;

    let update = payload.validate_update()?;
    let matched = library
        .replace_book_fields(isbn, &update)
        .await
        .map_err(RestError::internal(UPDATE_FAILED))?;
    if !matched {
        // Deleted between the lookup and the write
        return Err(RestError::BookNotFound);
    }

    info!(isbn = %isbn, "book updated");
    Ok(Json(MessageResponse::new("Book updated successfully.")))
}

/// `GET /getBook?isbn=...`
pub async fn get_book(
    State(state): State<AppState>,
    query: IsbnQuery,
) -> RestResult<Json<FetchedBookResponse>> {
    let params = query_params(query);
    let isbn = isbn_from_query(&params)?;

    let book = state
        .library
        .find_book_by_isbn(isbn)
        .await
        .map_err(RestError::internal(GET_FAILED))?
        .ok_or(RestError::BookNotFound)?;

    Ok(Json(FetchedBookResponse { fetched_book: book }))
}

/// Any unknown path
pub async fn route_not_found() -> RestError {
    RestError::RouteNotFound
}

/// A known path called with the wrong method
pub async fn method_not_allowed() -> RestError {
    RestError::MethodNotAllowed
}
