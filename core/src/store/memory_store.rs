//! In-memory document store

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{DocumentPath, DocumentStore};
use crate::Result;

/// Document store backed by an ordered map, for tests and local runs
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<BTreeMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held, across all collections
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

/// Direct children of `collection` in a path-keyed map
pub(super) fn collection_children(
    documents: &BTreeMap<String, Value>,
    collection: &DocumentPath,
) -> Vec<(String, Value)> {
    let prefix = format!("{}/", collection);
    documents
        .range(prefix.clone()..)
        .take_while(|(key, _)| key.starts_with(&prefix))
        .filter_map(|(key, value)| {
            let rest = &key[prefix.len()..];
            (!rest.contains('/')).then(|| (rest.to_string(), value.clone()))
        })
        .collect()
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(&self, path: &DocumentPath) -> Result<Option<Value>> {
        path.expect_document()?;
        let documents = self.documents.read().await;
        Ok(documents.get(&path.to_string()).cloned())
    }

    async fn set_document(&self, path: &DocumentPath, value: Value) -> Result<()> {
        path.expect_document()?;
        let mut documents = self.documents.write().await;
        documents.insert(path.to_string(), value);
        Ok(())
    }

    async fn query_collection(&self, collection: &DocumentPath) -> Result<Vec<(String, Value)>> {
        collection.expect_collection()?;
        let documents = self.documents.read().await;
        Ok(collection_children(&documents, collection))
    }
}
