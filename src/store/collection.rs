//! # In-Process Collections
//!
//! The document engine shared by the memory and file backends. Documents
//! keep insertion order. Unique fields are checked on every insert and
//! update.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::update::Update;

/// Field holding the store-assigned identifier
pub const ID_FIELD: &str = "id";

/// One named collection of JSON objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    unique_fields: BTreeSet<String>,

    #[serde(default)]
    documents: Vec<Value>,
}

impl Collection {
    /// Reject `document` if a unique field clashes with any document other
    /// than the one at `skip`
    fn check_unique(
        &self,
        name: &str,
        document: &Value,
        skip: Option<usize>,
    ) -> StoreResult<()> {
        for field in &self.unique_fields {
            let Some(value) = document.get(field).filter(|v| !v.is_null()) else {
                continue;
            };

            let clash = self
                .documents
                .iter()
                .enumerate()
                .filter(|(idx, _)| Some(*idx) != skip)
                .any(|(_, other)| other.get(field) == Some(value));

            if clash {
                return Err(StoreError::DuplicateKey {
                    collection: name.to_string(),
                    field: field.clone(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    fn position(&self, filter: &Filter) -> Option<usize> {
        self.documents.iter().position(|doc| filter.matches(doc))
    }
}

/// All collections of a database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    collections: BTreeMap<String, Collection>,
}

impl Collections {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    fn get_mut(&mut self, name: &str) -> &mut Collection {
        self.collections.entry(name.to_string()).or_default()
    }

    /// Declare `field` unique within `collection`.
    ///
    /// Fails if stored documents already hold duplicate values.
    pub fn ensure_unique(&mut self, collection: &str, field: &str) -> StoreResult<()> {
        let coll = self.get_mut(collection);
        if coll.unique_fields.contains(field) {
            return Ok(());
        }

        let mut seen = Vec::new();
        for value in coll.documents.iter().filter_map(|doc| doc.get(field)) {
            if value.is_null() {
                continue;
            }
            if seen.contains(&value) {
                return Err(StoreError::DuplicateKey {
                    collection: collection.to_string(),
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
            seen.push(value);
        }

        coll.unique_fields.insert(field.to_string());
        Ok(())
    }

    pub fn find_one(&self, collection: &str, filter: &Filter) -> Option<Value> {
        self.get(collection)?
            .documents
            .iter()
            .find(|doc| filter.matches(doc))
            .cloned()
    }

    pub fn find_many(&self, collection: &str, filter: &Filter) -> Vec<Value> {
        self.get(collection)
            .map(|coll| {
                coll.documents
                    .iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn count(&self, collection: &str, filter: &Filter) -> usize {
        self.get(collection)
            .map(|coll| coll.documents.iter().filter(|doc| filter.matches(doc)).count())
            .unwrap_or(0)
    }

    /// Store a new document under a fresh identifier and return it
    pub fn insert_one(&mut self, collection: &str, document: Value) -> StoreResult<Value> {
        let Value::Object(mut fields) = document else {
            return Err(StoreError::NotAnObject);
        };
        fields.insert(
            ID_FIELD.to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
        let document = Value::Object(fields);

        let coll = self.get_mut(collection);
        coll.check_unique(collection, &document, None)?;
        coll.documents.push(document.clone());

        Ok(document)
    }

    /// Apply `update` to the first matching document.
    ///
    /// Returns whether a document matched.
    pub fn update_one(
        &mut self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> StoreResult<bool> {
        if update.touches(ID_FIELD) {
            return Err(StoreError::SchemaViolation(
                "document identifier is immutable".to_string(),
            ));
        }

        let coll = self.get_mut(collection);
        let Some(idx) = coll.position(filter) else {
            return Ok(false);
        };

        let mut updated = coll.documents[idx].clone();
        if let Value::Object(fields) = &mut updated {
            update.apply_to(fields);
        }
        coll.check_unique(collection, &updated, Some(idx))?;
        coll.documents[idx] = updated;

        Ok(true)
    }

    /// Remove the first matching document and return it
    pub fn delete_one(&mut self, collection: &str, filter: &Filter) -> Option<Value> {
        let coll = self.collections.get_mut(collection)?;
        let idx = coll.position(filter)?;
        Some(coll.documents.remove(idx))
    }
}
