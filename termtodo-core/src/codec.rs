//! JSON encoding of the persisted task list.
//!
//! The stored value is a JSON array of task objects with the fields
//! `id`, `text`, `isCompleted` and `completedAt` (`null` when unset).

use crate::task::TaskList;

/// Error type for task list encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The JSON could not be produced or parsed.
    #[error("task list json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encodes a task list into its stored JSON form.
///
/// # Errors
///
/// Returns `CodecError::Json` if serialization fails.
pub fn encode(list: &TaskList) -> Result<String, CodecError> {
    Ok(serde_json::to_string(list)?)
}

/// Decodes a stored JSON task list.
///
/// Tasks that are not completed lose any stray completion timestamp.
///
/// # Errors
///
/// Returns `CodecError::Json` if the input is not a JSON array of tasks.
pub fn decode(json: &str) -> Result<TaskList, CodecError> {
    Ok(serde_json::from_str(json)?)
}
