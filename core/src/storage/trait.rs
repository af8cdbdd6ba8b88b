use async_trait::async_trait;

use crate::error::StoreError;

/// Single-key string storage the task collection is persisted into.
///
/// Implementations report medium failures as `StoreError::StorageUnavailable`.
/// `remove` of an absent key succeeds.
#[async_trait]
pub trait BlobStore: Send + Sync {
    fn name(&self) -> &str;
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, blob: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
