//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `taskflow_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_from_path, AppConfig, LoggingConfig, StorageBackend, StorageConfig,
};
pub use crate::error::{CliError, StoreError};
pub use crate::storage::{BlobStore, MemoryBlobStore};
pub use crate::store::{TaskStore, DEFAULT_TASKS_KEY};
pub use crate::task::{
    format_timestamp, generate_task_id, parse_timestamp, Priority, StatusFilter, Task,
    TaskIdGenerator, TaskStats,
};
