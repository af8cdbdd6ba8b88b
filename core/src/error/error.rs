use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing key-value medium could not be read or written.
    #[error("storage unavailable during {op} of {key:?}: {reason}")]
    StorageUnavailable {
        op: &'static str,
        key: String,
        reason: String,
    },
    #[error("stored task collection is malformed: {0}")]
    MalformedData(#[source] serde_json::Error),
    #[error("task not found: {id}")]
    NotFound { id: String },
    #[error("failed to serialize task collection: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    pub fn unavailable(op: &'static str, key: &str, reason: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable {
            op,
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
