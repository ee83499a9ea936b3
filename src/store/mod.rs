//! # Document Store
//!
//! The persistence gateway. A [`DocumentStore`] holds named collections
//! of JSON objects addressed by [`Filter`]s; [`LibraryGateway`] maps books
//! and authors onto it.
//!
//! # Connection strings
//!
//! - `memory://<name>` - in-process, nothing survives a restart
//! - `file://<path>` - JSON snapshot file, created if missing

mod backend;
mod collection;
mod errors;
mod file;
mod filter;
mod gateway;
mod memory;
mod update;

use std::sync::Arc;

pub use backend::{DocumentStore, StoreHandle};
pub use collection::{Collections, ID_FIELD};
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use filter::{Filter, FilterExpr, FilterOperator};
pub use gateway::{LibraryGateway, AUTHORS, BOOKS};
pub use memory::MemoryStore;
pub use update::Update;

/// Open the store named by `uri`
pub async fn connect(uri: &str) -> StoreResult<StoreHandle> {
    let Some((scheme, location)) = uri.split_once("://") else {
        return Err(StoreError::UnsupportedScheme(uri.to_string()));
    };

    match scheme {
        "memory" => Ok(Arc::new(MemoryStore::new(location))),
        "file" => {
            if location.is_empty() {
                return Err(StoreError::Connection(
                    "file store needs a path, e.g. file://./bookshelf.json".to_string(),
                ));
            }
            Ok(Arc::new(FileStore::open(location).await?))
        }
        other => Err(StoreError::UnsupportedScheme(other.to_string())),
    }
}
