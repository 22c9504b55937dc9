//! File-based document store implementation
//!
//! Keeps every document in one JSON object keyed by path and rewrites the
//! file after each write.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::memory_store::collection_children;
use super::{DocumentPath, DocumentStore};
use crate::{Error, Result};

/// Document store persisted to a single JSON file
pub struct FileDocumentStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory copy of every document
    cache: RwLock<BTreeMap<String, Value>>,
}

impl FileDocumentStore {
    /// Open the store at `path`.
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                Error::Storage(format!("Failed to read documents file: {}", e))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                Error::Storage(format!("Failed to parse documents file: {}", e))
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Persist the cache to disk
    async fn persist(&self, documents: &BTreeMap<String, Value>) -> Result<()> {
        let content = serde_json::to_string_pretty(documents)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn get_document(&self, path: &DocumentPath) -> Result<Option<Value>> {
        path.expect_document()?;
        let cache = self.cache.read().await;
        Ok(cache.get(&path.to_string()).cloned())
    }

    async fn set_document(&self, path: &DocumentPath, value: Value) -> Result<()> {
        path.expect_document()?;
        let mut cache = self.cache.write().await;
        let mut next = cache.clone();
        next.insert(path.to_string(), value);
        // Written under the lock so concurrent writers cannot reorder file contents.
        // The cache only changes once the file holds the new document.
        self.persist(&next).await?;
        *cache = next;
        Ok(())
    }

    async fn query_collection(&self, collection: &DocumentPath) -> Result<Vec<(String, Value)>> {
        collection.expect_collection()?;
        let cache = self.cache.read().await;
        Ok(collection_children(&cache, collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    async fn create_test_store() -> (FileDocumentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("documents.json");
        let store = FileDocumentStore::new(&path).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_write_and_reload() {
        let (store, temp) = create_test_store().await;
        let path = DocumentPath::new("dormitories").child("d1");

        store
            .set_document(&path, json!({"name": "Sunrise"}))
            .await
            .unwrap();

        let reopened = FileDocumentStore::new(temp.path().join("documents.json"))
            .await
            .unwrap();
        let doc = reopened.get_document(&path).await.unwrap();
        assert_eq!(doc, Some(json!({"name": "Sunrise"})));
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("documents.json");
        let store = FileDocumentStore::new(&path).await.unwrap();

        store
            .set_document(&DocumentPath::new("dormitories").child("d1"), json!({}))
            .await
            .unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("documents.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let result = FileDocumentStore::new(&path).await;
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn test_failed_write_is_not_readable() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the data directory should be makes every write fail
        let blocker = temp_dir.path().join("blocker");
        tokio::fs::write(&blocker, "").await.unwrap();
        let store = FileDocumentStore::new(blocker.join("documents.json"))
            .await
            .unwrap();
        let path = DocumentPath::new("dormitories").child("d1");

        let result = store.set_document(&path, json!({"name": "A"})).await;

        assert!(result.is_err());
        assert!(store.get_document(&path).await.unwrap().is_none());
        let collection = DocumentPath::new("dormitories");
        assert!(store.query_collection(&collection).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_overwrite_keeps_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let store = FileDocumentStore::new(data_dir.join("documents.json"))
            .await
            .unwrap();
        let path = DocumentPath::new("dormitories").child("d1");
        store.set_document(&path, json!({"v": 1})).await.unwrap();

        // Swap the data directory for a regular file so the next write fails
        tokio::fs::remove_dir_all(&data_dir).await.unwrap();
        tokio::fs::write(&data_dir, "").await.unwrap();

        assert!(store.set_document(&path, json!({"v": 2})).await.is_err());
        assert_eq!(store.get_document(&path).await.unwrap(), Some(json!({"v": 1})));
    }

    #[tokio::test]
    async fn test_query_collection() {
        let (store, _temp) = create_test_store().await;
        let rooms = DocumentPath::new("dormitories").child("d1").child("rooms");

        store.set_document(&rooms.child("a"), json!({"n": "101"})).await.unwrap();
        store.set_document(&rooms.child("b"), json!({"n": "102"})).await.unwrap();

        let docs = store.query_collection(&rooms).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].0, "a");
    }
}
