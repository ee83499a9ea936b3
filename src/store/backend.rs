//! # Document Store Backend
//!
//! The operations every backend offers. Each call is one atomic step
//! against the store; nothing spans calls.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::errors::StoreResult;
use super::filter::Filter;
use super::update::Update;

/// A document database holding named collections of JSON objects
#[async_trait]
pub trait DocumentStore: Debug + Send + Sync {
    /// Short description of the backend, for logs
    fn describe(&self) -> String;

    /// Declare `field` unique within `collection`
    async fn ensure_unique(&self, collection: &str, field: &str) -> StoreResult<()>;

    /// First document matching `filter`
    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Value>>;

    /// Every document matching `filter`, in insertion order
    async fn find_many(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Value>>;

    /// Store a new document; the returned copy carries the assigned `id`
    async fn insert_one(&self, collection: &str, document: Value) -> StoreResult<Value>;

    /// Apply `update` to the first matching document.
    ///
    /// Returns `false` if nothing matched.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> StoreResult<bool>;

    /// Remove the first matching document, returning it
    async fn delete_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Value>>;

    /// Number of documents matching `filter`
    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<usize>;
}

/// Shared handle to a connected store
pub type StoreHandle = Arc<dyn DocumentStore>;
