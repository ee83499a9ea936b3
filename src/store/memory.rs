//! # In-Memory Backend
//!
//! Nothing survives the process. Used for tests and throwaway instances.

use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::backend::DocumentStore;
use super::collection::Collections;
use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::update::Update;

/// Store kept entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    name: String,
    data: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: RwLock::new(Collections::new()),
        }
    }

    fn read<T>(&self, op: impl FnOnce(&Collections) -> T) -> StoreResult<T> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(op(&data))
    }

    fn write<T>(&self, op: impl FnOnce(&mut Collections) -> StoreResult<T>) -> StoreResult<T> {
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        op(&mut data)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn describe(&self) -> String {
        format!("memory://{}", self.name)
    }

    async fn ensure_unique(&self, collection: &str, field: &str) -> StoreResult<()> {
        self.write(|db| db.ensure_unique(collection, field))
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Value>> {
        self.read(|db| db.find_one(collection, filter))
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Value>> {
        self.read(|db| db.find_many(collection, filter))
    }

    async fn insert_one(&self, collection: &str, document: Value) -> StoreResult<Value> {
        self.write(|db| db.insert_one(collection, document))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> StoreResult<bool> {
        self.write(|db| db.update_one(collection, filter, update))
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Value>> {
        self.write(|db| Ok(db.delete_one(collection, filter)))
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<usize> {
        self.read(|db| db.count(collection, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_round_trip_through_trait_object() {
        let store: crate::store::StoreHandle = std::sync::Arc::new(MemoryStore::new("test"));
        store.ensure_unique("books", "isbn").await.unwrap();

        let doc = store
            .insert_one("books", json!({"isbn": "978-0452284246", "title": "1984"}))
            .await
            .unwrap();

        let found = store
            .find_one("books", &Filter::by("isbn", "978-0452284246"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, doc);
        assert_eq!(store.describe(), "memory://test");
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = MemoryStore::new("test");
        store.ensure_unique("books", "isbn").await.unwrap();
        store.insert_one("books", json!({"isbn": "1"})).await.unwrap();

        let err = store.insert_one("books", json!({"isbn": "1"})).await.unwrap_err();
        assert!(err.is_duplicate_key());
    }
}
