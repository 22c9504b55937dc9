//! Document store capability
//!
//! The domain treats its backing database as an opaque document store with
//! three operations: read a document, write a document, list a collection.
//! Anything that can do that (a hosted database, a JSON file, a map in
//! memory) can back the service.

mod file_store;
mod memory_store;
mod path;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use file_store::FileDocumentStore;
pub use memory_store::MemoryDocumentStore;
pub use path::DocumentPath;

use crate::Result;

/// Capability interface over a hierarchical document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a single document, `None` if it does not exist
    async fn get_document(&self, path: &DocumentPath) -> Result<Option<Value>>;

    /// Create or overwrite a document
    async fn set_document(&self, path: &DocumentPath, value: Value) -> Result<()>;

    /// List the direct children of a collection, ordered by document id
    async fn query_collection(&self, collection: &DocumentPath) -> Result<Vec<(String, Value)>>;

    /// Allocate an id for a new document in `collection`
    fn new_document_id(&self, _collection: &DocumentPath) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Read and deserialize a document
pub async fn get_typed<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    path: &DocumentPath,
) -> Result<Option<T>> {
    match store.get_document(path).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and write a document
pub async fn set_typed<T: Serialize>(
    store: &dyn DocumentStore,
    path: &DocumentPath,
    value: &T,
) -> Result<()> {
    let value = serde_json::to_value(value)?;
    store.set_document(path, value).await
}

/// List and deserialize every document of a collection.
///
/// Documents that fail to deserialize are skipped with a warning so one
/// malformed record does not hide the rest of the collection.
pub async fn query_typed<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &DocumentPath,
) -> Result<Vec<T>> {
    let docs = store.query_collection(collection).await?;
    let mut items = Vec::with_capacity(docs.len());
    for (id, value) in docs {
        match serde_json::from_value(value) {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!(collection = %collection, doc_id = %id, error = %e, "Skipping malformed document");
            }
        }
    }
    Ok(items)
}
