//! File-backed blob store.
//!
//! Each key is one JSON file under the root directory. Writes go to a temp
//! file in the same directory and are renamed over the target, so a crash
//! mid-write never leaves a half-written collection behind.
//!
//! The timeout covers reads, removals and staging the temp file. The rename
//! that commits a write is never timed out: once it is issued, its result is
//! the result of `set`.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use taskflow_core::api::{BlobStore, StoreError};

const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

pub struct FileBlobStore {
    root: PathBuf,
    io_timeout: Duration,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_stem(key)))
    }

    async fn bounded<T, F>(&self, op: &'static str, key: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = std::io::Result<T>>,
    {
        match tokio::time::timeout(self.io_timeout, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => Err(StoreError::unavailable(op, key, e)),
            Err(_) => Err(StoreError::unavailable(
                op,
                key,
                format!("timed out after {}ms", self.io_timeout.as_millis()),
            )),
        }
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        let bytes = self
            .bounded("read", key, async {
                match tokio::fs::read(&path).await {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await?;

        // Undecodable bytes are handed on as text so they surface as a
        // malformed collection, not as an unreadable medium.
        Ok(bytes.map(|bytes| match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "blob is not valid UTF-8");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        }))
    }

    async fn set(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp_path = self.root.join(format!(
            ".{}.tmp-{}",
            file_stem(key),
            Uuid::new_v4().simple()
        ));

        let res = match self
            .bounded("write", key, stage_temp_file(&self.root, &tmp_path, blob))
            .await
        {
            Ok(()) => tokio::fs::rename(&tmp_path, &path)
                .await
                .map_err(|e| StoreError::unavailable("write", key, e)),
            Err(e) => Err(e),
        };
        if res.is_err() {
            let _ = tokio::fs::remove_file(&tmp_path).await;
        }
        tracing::debug!(path = %path.display(), bytes = blob.len(), ok = res.is_ok(), "blob written");
        res
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        self.bounded("remove", key, async {
            match tokio::fs::remove_file(&path).await {
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            }
        })
        .await
    }
}

async fn stage_temp_file(root: &Path, tmp_path: &Path, blob: &str) -> std::io::Result<()> {
    tokio::fs::create_dir_all(root).await?;

    let mut file = tokio::fs::File::create(tmp_path).await?;
    file.write_all(blob.as_bytes()).await?;
    file.sync_all().await
}

fn is_file_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// File stem for a storage key.
///
/// Keys made only of `[A-Za-z0-9_-]` are used as they are. Any other key is
/// mapped to a readable stem plus a short digest of the original key, so two
/// distinct keys never share a file: `@taskflow_tasks` -> `taskflow_tasks-<8 hex>`.
fn file_stem(key: &str) -> String {
    if !key.is_empty() && key.chars().all(is_file_safe) {
        return key.to_string();
    }

    let mapped: String = key
        .chars()
        .map(|c| if is_file_safe(c) { c } else { '_' })
        .collect();
    let readable = match mapped.trim_matches('_') {
        "" => "default",
        trimmed => trimmed,
    };
    let digest = Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).simple().to_string();
    format!("{readable}-{}", &digest[..8])
}
