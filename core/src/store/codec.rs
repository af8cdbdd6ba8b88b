use crate::error::StoreError;
use crate::task::Task;

/// Parse a stored blob. Anything that is not a JSON array of tasks is malformed.
pub fn decode_collection(blob: &str) -> Result<Vec<Task>, StoreError> {
    serde_json::from_str(blob).map_err(StoreError::MalformedData)
}

pub fn encode_collection(tasks: &[Task]) -> Result<String, StoreError> {
    serde_json::to_string(tasks).map_err(StoreError::Serialize)
}
