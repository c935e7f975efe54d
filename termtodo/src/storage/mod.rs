//! Local key-value persistence.
//!
//! Defines the [`KeyValueStore`] trait the task list is saved through,
//! a directory-backed [`FileStore`], an [`InMemoryStore`] for tests and
//! ephemeral runs, and the [`SaveQueue`] that serializes writes.
//!
//! # Failure policy
//!
//! Storage never takes the app down:
//! 1. A failed or unreadable load starts the session with an empty list.
//! 2. A failed save is logged; the in-memory list stays authoritative and
//!    the next successful save overwrites the stored value.

pub mod file;
pub mod memory;
pub mod queue;

pub use file::FileStore;
pub use memory::InMemoryStore;
pub use queue::SaveQueue;

/// Key the task list is stored under.
pub const TASKS_STORAGE_KEY: &str = "@todoList:tasks";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying storage is unavailable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A write operation failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// A read operation failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// The key cannot be mapped onto the storage backend.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// Persistent string storage addressed by key.
///
/// Implementations include:
/// - [`FileStore`] — one file per key in a data directory
/// - [`InMemoryStore`] — process-local map
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
