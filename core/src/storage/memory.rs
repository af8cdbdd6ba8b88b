//! Process-local blob store. Contents are lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BlobStore;
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, handy for exercising corrupt or legacy blobs.
    pub fn with_entry(key: impl Into<String>, blob: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), blob.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
