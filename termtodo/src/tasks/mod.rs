//! Task list state for `termtodo`.
//!
//! [`TaskStore`] owns the ordered task list for the lifetime of the app and
//! applies user mutations. Each successful mutation returns the new
//! immutable [`TaskList`](termtodo_core::task::TaskList) snapshot, which the
//! caller hands to the save queue. The display split into Pending and
//! Completed sections is a derived view, see [`partition`].

pub mod partition;
pub mod store;

pub use partition::{Partition, Section, SectionKind, partition};
pub use store::{DEFAULT_TIMESTAMP_FORMAT, TaskStore, load_tasks};

use thiserror::Error;

/// Reasons a task mutation was not applied.
///
/// None of these are surfaced to the user: the UI treats them as silent
/// no-ops and only logs them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task text is empty after trimming.
    #[error("task text cannot be empty")]
    EmptyText,
    /// Task with the given ID was not found.
    #[error("task not found: {0}")]
    NotFound(String),
    /// The task was already completed; its timestamp is kept.
    #[error("task already completed: {0}")]
    AlreadyCompleted(String),
}
