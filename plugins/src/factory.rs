use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use taskflow_core::api::{AppConfig, BlobStore, MemoryBlobStore, StorageBackend, TaskStore};

use crate::storage::FileBlobStore;

pub fn build_blob_store(cfg: &AppConfig) -> Result<Arc<dyn BlobStore>> {
    let storage = &cfg.storage;
    match storage.backend {
        StorageBackend::File => {
            let data_dir = storage.data_dir.trim();
            if data_dir.is_empty() {
                anyhow::bail!("storage.data_dir must be set for the file backend");
            }
            Ok(Arc::new(
                FileBlobStore::new(data_dir)
                    .with_timeout(Duration::from_millis(storage.io_timeout_ms.max(1))),
            ))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryBlobStore::new())),
    }
}

pub fn build_task_store(cfg: &AppConfig) -> Result<TaskStore> {
    let blob = build_blob_store(cfg)?;
    let key = cfg.storage.key.trim();
    if key.is_empty() {
        anyhow::bail!("storage.key must not be empty");
    }
    tracing::debug!(backend = blob.name(), key, "task store ready");
    Ok(TaskStore::with_key(blob, key))
}
