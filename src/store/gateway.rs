//! # Library Gateway
//!
//! Typed access to the `books` and `authors` collections. Every method is
//! a single store call or a read followed by a read; none of them write
//! more than one document.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::model::{
    Author, AuthorId, AuthorSummary, Book, BookListing, BookUpdate, NewAuthor, NewBook,
};

use super::backend::StoreHandle;
use super::collection::ID_FIELD;
use super::errors::{StoreError, StoreResult};
use super::filter::{Filter, FilterExpr};
use super::update::Update;

/// Collection holding books
pub const BOOKS: &str = "books";

/// Collection holding authors
pub const AUTHORS: &str = "authors";

/// Typed operations over a connected store
#[derive(Debug, Clone)]
pub struct LibraryGateway {
    store: StoreHandle,
}

fn decode<T: DeserializeOwned>(document: Value) -> StoreResult<T> {
    serde_json::from_value(document).map_err(StoreError::from)
}

fn by_author(author: AuthorId) -> Filter {
    Filter::by("author", author.to_string())
}

impl LibraryGateway {
    /// Wrap `store`, declaring the unique ISBN constraint on books
    pub async fn open(store: StoreHandle) -> StoreResult<Self> {
        store.ensure_unique(BOOKS, "isbn").await?;
        Ok(Self { store })
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub async fn find_book_by_isbn(&self, isbn: &str) -> StoreResult<Option<Book>> {
        self.store
            .find_one(BOOKS, &Filter::by("isbn", isbn))
            .await?
            .map(decode)
            .transpose()
    }

    /// Exact, case-sensitive name match
    pub async fn find_author_by_name(&self, name: &str) -> StoreResult<Option<Author>> {
        self.store
            .find_one(AUTHORS, &Filter::by("name", name))
            .await?
            .map(decode)
            .transpose()
    }

    /// Store a new author after checking its record constraints
    pub async fn create_author(&self, author: &NewAuthor) -> StoreResult<Author> {
        self.create_author_as_of(author, Utc::now().date_naive()).await
    }

    pub(crate) async fn create_author_as_of(
        &self,
        author: &NewAuthor,
        today: NaiveDate,
    ) -> StoreResult<Author> {
        author
            .check_schema(today)
            .map_err(StoreError::SchemaViolation)?;

        let document = self
            .store
            .insert_one(AUTHORS, serde_json::to_value(author)?)
            .await?;
        let author: Author = decode(document)?;

        debug!(author_id = %author.id, name = %author.name, "author created");
        Ok(author)
    }

    /// Store a new book; fails with a duplicate key error if the ISBN is taken
    pub async fn create_book(&self, book: &NewBook) -> StoreResult<Book> {
        let document = self
            .store
            .insert_one(BOOKS, serde_json::to_value(book)?)
            .await?;
        decode(document)
    }

    /// All books, each with its author reference resolved
    pub async fn list_books_with_authors(&self) -> StoreResult<Vec<BookListing>> {
        let books: Vec<Book> = self
            .store
            .find_many(BOOKS, &Filter::all())
            .await?
            .into_iter()
            .map(decode)
            .collect::<StoreResult<_>>()?;

        let mut author_ids: Vec<Value> = books
            .iter()
            .map(|book| Value::String(book.author.to_string()))
            .collect();
        author_ids.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
        author_ids.dedup();

        let authors: HashMap<AuthorId, AuthorSummary> = self
            .store
            .find_many(AUTHORS, &Filter::all().and(FilterExpr::in_list(ID_FIELD, author_ids)))
            .await?
            .into_iter()
            .map(|doc| decode::<Author>(doc).map(|author| (author.id, author.summary())))
            .collect::<StoreResult<_>>()?;

        Ok(books
            .into_iter()
            .map(|book| {
                let author = authors.get(&book.author).cloned();
                BookListing::new(book, author)
            })
            .collect())
    }

    /// Overwrite every mutable field of the book with this ISBN.
    ///
    /// Returns `false` if no such book exists.
    pub async fn replace_book_fields(&self, isbn: &str, update: &BookUpdate) -> StoreResult<bool> {
        let update = Update::new()
            .set("title", update.title.clone())
            .set("price", update.price)
            .set_or_unset("language", update.language.clone())
            .set("publisher", update.publisher.clone());

        self.store
            .update_one(BOOKS, &Filter::by("isbn", isbn), &update)
            .await
    }

    /// Remove the book with this ISBN, returning it
    pub async fn delete_book_by_isbn(&self, isbn: &str) -> StoreResult<Option<Book>> {
        self.store
            .delete_one(BOOKS, &Filter::by("isbn", isbn))
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn count_books_by_author(&self, author: AuthorId) -> StoreResult<usize> {
        self.store.count(BOOKS, &by_author(author)).await
    }

    pub async fn count_authors(&self) -> StoreResult<usize> {
        self.store.count(AUTHORS, &Filter::all()).await
    }

    /// Returns whether an author was removed
    pub async fn delete_author(&self, author: AuthorId) -> StoreResult<bool> {
        let deleted = self
            .store
            .delete_one(AUTHORS, &Filter::by(ID_FIELD, author.to_string()))
            .await?;
        Ok(deleted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    async fn gateway() -> LibraryGateway {
        LibraryGateway::open(Arc::new(MemoryStore::new("gateway")))
            .await
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn orwell() -> NewAuthor {
        NewAuthor {
            name: "George Orwell".to_string(),
            country: Some("United Kingdom".to_string()),
            birth_date: date(1903, 6, 25),
        }
    }

    fn nineteen_eighty_four(author: AuthorId) -> NewBook {
        NewBook {
            title: "1984".to_string(),
            author,
            price: 13.0,
            isbn: "978-0452284246".to_string(),
            language: Some("English".to_string()),
            number_of_pages: 328,
            publisher: "Penguin Books".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let gw = gateway().await;
        let author = gw.create_author(&orwell()).await.unwrap();
        let book = gw.create_book(&nineteen_eighty_four(author.id)).await.unwrap();

        assert_eq!(gw.find_book_by_isbn("978-0452284246").await.unwrap(), Some(book));
        assert_eq!(
            gw.find_author_by_name("George Orwell").await.unwrap(),
            Some(author)
        );
        assert_eq!(gw.find_author_by_name("george orwell").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_author_enforces_age() {
        let gw = gateway().await;
        let mut toddler = orwell();
        toddler.birth_date = date(2022, 1, 1);

        let err = gw
            .create_author_as_of(&toddler, date(2024, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SchemaViolation(_)));
        assert_eq!(gw.count_authors().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_isbn_rejected_by_store() {
        let gw = gateway().await;
        let author = gw.create_author(&orwell()).await.unwrap();
        gw.create_book(&nineteen_eighty_four(author.id)).await.unwrap();

        let err = gw
            .create_book(&nineteen_eighty_four(author.id))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_key());
    }

    #[tokio::test]
    async fn test_listing_resolves_authors() {
        let gw = gateway().await;
        let author = gw.create_author(&orwell()).await.unwrap();
        gw.create_book(&nineteen_eighty_four(author.id)).await.unwrap();

        let mut animal_farm = nineteen_eighty_four(author.id);
        animal_farm.title = "Animal Farm".to_string();
        animal_farm.isbn = "978-0451526342".to_string();
        gw.create_book(&animal_farm).await.unwrap();

        let listing = gw.list_books_with_authors().await.unwrap();
        assert_eq!(listing.len(), 2);
        for entry in &listing {
            assert_eq!(entry.author.as_ref().unwrap().name, "George Orwell");
        }
    }

    #[tokio::test]
    async fn test_replace_book_fields_clears_language() {
        let gw = gateway().await;
        let author = gw.create_author(&orwell()).await.unwrap();
        gw.create_book(&nineteen_eighty_four(author.id)).await.unwrap();

        let update = BookUpdate {
            title: "Nineteen Eighty-Four".to_string(),
            price: 9.5,
            language: None,
            publisher: "Secker & Warburg".to_string(),
        };
        assert!(gw.replace_book_fields("978-0452284246", &update).await.unwrap());
        assert!(!gw.replace_book_fields("missing", &update).await.unwrap());

        let book = gw.find_book_by_isbn("978-0452284246").await.unwrap().unwrap();
        assert_eq!(book.title, "Nineteen Eighty-Four");
        assert_eq!(book.price, 9.5);
        assert_eq!(book.language, None);
        assert_eq!(book.number_of_pages, 328);
        assert_eq!(book.author, author.id);
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let gw = gateway().await;
        let author = gw.create_author(&orwell()).await.unwrap();
        gw.create_book(&nineteen_eighty_four(author.id)).await.unwrap();
        assert_eq!(gw.count_books_by_author(author.id).await.unwrap(), 1);

        let deleted = gw.delete_book_by_isbn("978-0452284246").await.unwrap().unwrap();
        assert_eq!(deleted.author, author.id);
        assert_eq!(gw.count_books_by_author(author.id).await.unwrap(), 0);
        assert!(gw.delete_book_by_isbn("978-0452284246").await.unwrap().is_none());

        assert!(gw.delete_author(author.id).await.unwrap());
        assert!(!gw.delete_author(author.id).await.unwrap());
    }
}
