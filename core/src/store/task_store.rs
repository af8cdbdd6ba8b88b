use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::codec::{decode_collection, encode_collection};
use crate::error::StoreError;
use crate::storage::BlobStore;
use crate::task::{Priority, StatusFilter, Task, TaskStats};

/// Key the collection has always been stored under.
pub const DEFAULT_TASKS_KEY: &str = "@taskflow_tasks";

/// Task collection persisted as one blob.
///
/// Clones share the same backend and the same operation lock, so every
/// read-modify-write issued through one `TaskStore` (or its clones) runs to
/// completion before the next begins. Separate instances over the same
/// backend are not coordinated; the last write wins.
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<TaskStoreInner>,
}

struct TaskStoreInner {
    blob: Arc<dyn BlobStore>,
    key: String,
    op_lock: Mutex<()>,
}

impl TaskStore {
    pub fn new(blob: Arc<dyn BlobStore>) -> Self {
        Self::with_key(blob, DEFAULT_TASKS_KEY)
    }

    pub fn with_key(blob: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(TaskStoreInner {
                blob,
                key: key.into(),
                op_lock: Mutex::new(()),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    pub fn backend_name(&self) -> &str {
        self.inner.blob.name()
    }

    /// Read the collection, degrading any failure to an empty list.
    pub async fn load(&self) -> Vec<Task> {
        match self.try_load().await {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(key = %self.key(), error = %e, "failed to load tasks, using empty list");
                Vec::new()
            }
        }
    }

    /// Read the collection, reporting unavailable or malformed storage.
    pub async fn try_load(&self) -> Result<Vec<Task>, StoreError> {
        let _guard = self.inner.op_lock.lock().await;
        self.read_collection().await
    }

    /// Append `task` and persist. Does not check for an existing id.
    pub async fn insert(&self, task: Task) -> Result<Vec<Task>, StoreError> {
        let _guard = self.inner.op_lock.lock().await;
        let mut tasks = self.read_for_write().await?;
        let id = task.id.clone();
        tasks.push(task);
        self.write_collection(&tasks).await?;
        tracing::info!(key = %self.key(), task_id = %id, total = tasks.len(), "task inserted");
        Ok(tasks)
    }

    /// Replace the first task whose id is `id` with `replacement`, verbatim.
    pub async fn update_by_id(&self, id: &str, replacement: Task) -> Result<Vec<Task>, StoreError> {
        let _guard = self.inner.op_lock.lock().await;
        self.replace_locked(id, |_| replacement).await
    }

    /// Flip `completed` on the first task whose id is `id`.
    pub async fn toggle_completed(&self, id: &str) -> Result<Vec<Task>, StoreError> {
        let _guard = self.inner.op_lock.lock().await;
        self.replace_locked(id, |current| {
            let completed = !current.completed;
            current.clone().with_completed(completed)
        })
        .await
    }

    /// Remove every task whose id is `id`. Persists even when nothing matched.
    pub async fn delete_by_id(&self, id: &str) -> Result<Vec<Task>, StoreError> {
        let _guard = self.inner.op_lock.lock().await;
        let mut tasks = self.read_for_write().await?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        self.write_collection(&tasks).await?;
        tracing::info!(
            key = %self.key(),
            task_id = %id,
            removed = before - tasks.len(),
            total = tasks.len(),
            "task delete applied"
        );
        Ok(tasks)
    }

    /// Drop the stored blob entirely. A later load sees an empty collection.
    pub async fn clear_all(&self) -> Result<Vec<Task>, StoreError> {
        let _guard = self.inner.op_lock.lock().await;
        self.inner.blob.remove(self.key()).await.map_err(|e| {
            tracing::error!(key = %self.key(), error = %e, "failed to clear tasks");
            e
        })?;
        tracing::info!(key = %self.key(), "all tasks cleared");
        Ok(Vec::new())
    }

    pub async fn stats(&self, now: DateTime<Utc>) -> TaskStats {
        TaskStats::from_tasks(&self.load().await, now)
    }

    pub async fn stats_now(&self) -> TaskStats {
        self.stats(Utc::now()).await
    }

    pub async fn by_priority(&self, priority: Priority) -> Vec<Task> {
        self.load()
            .await
            .into_iter()
            .filter(|task| task.priority == priority)
            .collect()
    }

    pub async fn by_status(&self, filter: StatusFilter) -> Vec<Task> {
        self.load()
            .await
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    pub async fn completed_count(&self) -> usize {
        self.load().await.iter().filter(|task| task.completed).count()
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Task> {
        self.load().await.into_iter().find(|task| task.id == id)
    }

    /// Pretty-printed copy of the stored collection.
    pub async fn export_json(&self) -> Result<String, StoreError> {
        let tasks = self.try_load().await?;
        serde_json::to_string_pretty(&tasks).map_err(StoreError::Serialize)
    }

    /// Replace the stored collection with the one encoded in `blob`.
    /// Nothing is written unless `blob` parses as a task collection.
    pub async fn import_json(&self, blob: &str) -> Result<Vec<Task>, StoreError> {
        let tasks = decode_collection(blob)?;
        let _guard = self.inner.op_lock.lock().await;
        self.write_collection(&tasks).await?;
        tracing::info!(key = %self.key(), total = tasks.len(), "tasks imported");
        Ok(tasks)
    }

    async fn replace_locked<F>(&self, id: &str, f: F) -> Result<Vec<Task>, StoreError>
    where
        F: FnOnce(&Task) -> Task,
    {
        let mut tasks = self.read_for_write().await?;
        let Some(slot) = tasks.iter_mut().find(|task| task.id == id) else {
            tracing::warn!(key = %self.key(), task_id = %id, "update target not found");
            return Err(StoreError::not_found(id));
        };
        *slot = f(&*slot);
        self.write_collection(&tasks).await?;
        tracing::info!(key = %self.key(), task_id = %id, "task updated");
        Ok(tasks)
    }

    async fn read_collection(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = match self.inner.blob.get(self.key()).await? {
            Some(blob) => decode_collection(&blob)?,
            None => Vec::new(),
        };
        tracing::debug!(key = %self.key(), total = tasks.len(), "tasks loaded");
        Ok(tasks)
    }

    /// Load ahead of a mutation. A corrupt blob is replaced by the write that
    /// follows; an unreadable medium aborts the mutation.
    async fn read_for_write(&self) -> Result<Vec<Task>, StoreError> {
        match self.read_collection().await {
            Err(StoreError::MalformedData(e)) => {
                tracing::warn!(key = %self.key(), error = %e, "discarding malformed task blob");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn write_collection(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let blob = encode_collection(tasks)?;
        self.inner.blob.set(self.key(), &blob).await.map_err(|e| {
            tracing::error!(key = %self.key(), error = %e, "failed to persist tasks");
            e
        })
    }
}
