//! # File Backend
//!
//! The whole database lives in one JSON snapshot file. Every write builds
//! the next state, persists it through a temporary file and a rename, and
//! only then makes it visible. A failed write leaves both the file and the
//! in-memory state untouched.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::backend::DocumentStore;
use super::collection::Collections;
use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::update::Update;

/// Store persisted to a JSON snapshot file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: Mutex<Collections>,
}

impl FileStore {
    /// Open the snapshot at `path`, creating an empty one if it does not exist
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let state = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Connection(format!("{} is not a valid snapshot: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let state = Collections::new();
                persist(&path, &state).await.map_err(|e| {
                    StoreError::Connection(format!("cannot create {}: {}", path.display(), e))
                })?;
                state
            }
            Err(e) => {
                return Err(StoreError::Connection(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read<T>(&self, op: impl FnOnce(&Collections) -> T) -> T {
        let state = self.state.lock().await;
        op(&state)
    }

    async fn write<T>(
        &self,
        op: impl FnOnce(&mut Collections) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut state = self.state.lock().await;

        let mut next = state.clone();
        let result = op(&mut next)?;
        persist(&self.path, &next).await?;
        *state = next;

        Ok(result)
    }
}

/// Write `state` to `path` via a sibling temporary file
async fn persist(path: &Path, state: &Collections) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let bytes = serde_json::to_vec_pretty(state)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, &bytes).await?;
    fs::rename(&tmp, path).await?;

    debug!(path = %path.display(), bytes = bytes.len(), "snapshot written");
    Ok(())
}

#[async_trait]
impl DocumentStore for FileStore {
    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }

    async fn ensure_unique(&self, collection: &str, field: &str) -> StoreResult<()> {
        self.write(|db| db.ensure_unique(collection, field)).await
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Value>> {
        Ok(self.read(|db| db.find_one(collection, filter)).await)
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Value>> {
        Ok(self.read(|db| db.find_many(collection, filter)).await)
    }

    async fn insert_one(&self, collection: &str, document: Value) -> StoreResult<Value> {
        self.write(|db| db.insert_one(collection, document)).await
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> StoreResult<bool> {
        self.write(|db| db.update_one(collection, filter, update)).await
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Value>> {
        self.write(|db| Ok(db.delete_one(collection, filter))).await
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<usize> {
        Ok(self.read(|db| db.count(collection, filter)).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_snapshot() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data").join("books.json");

        let store = FileStore::open(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }

    #[tokio::test]
    async fn test_writes_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("books.json");

        {
            let store = FileStore::open(&path).await.unwrap();
            store.ensure_unique("books", "isbn").await.unwrap();
            store
                .insert_one("books", json!({"isbn": "978-0452284246"}))
                .await
                .unwrap();
        }

        let store = FileStore::open(&path).await.unwrap();
        assert_eq!(store.count("books", &Filter::all()).await.unwrap(), 1);

        // Unique declarations are part of the snapshot
        let err = store
            .insert_one("books", json!({"isbn": "978-0452284246"}))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_key());
    }

    #[tokio::test]
    async fn test_rejected_write_leaves_state_unchanged() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path().join("books.json")).await.unwrap();

        assert!(store.insert_one("books", json!("not an object")).await.is_err());
        assert_eq!(store.count("books", &Filter::all()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_a_connection_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("books.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = FileStore::open(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)));
    }
}
