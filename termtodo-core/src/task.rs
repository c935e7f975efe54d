//! Task model for `termtodo`.
//!
//! A [`Task`] is a single to-do item. A [`TaskList`] is an immutable,
//! cheaply clonable snapshot of the whole ordered list; every mutation of
//! the list produces a new snapshot, which is what gets persisted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier of a task.
///
/// Freshly created ids are UUID v7 strings (time-ordered). Any string read
/// back from storage is accepted, so lists written by other versions of the
/// app (which used millisecond timestamps) keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new, time-ordered task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wraps an existing identifier string.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single to-do item.
///
/// Invariant: a task that is not completed has no completion timestamp.
/// Once completed, a task stays completed and keeps its first timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// User-entered text, never empty after trimming.
    pub text: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub is_completed: bool,
    /// Local completion time, formatted for display when the task was completed.
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl Task {
    /// Creates a pending task with a fresh id.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            text: text.into(),
            is_completed: false,
            completed_at: None,
        }
    }

    /// Returns `true` if the task still shows up in the Pending section.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.is_completed
    }

    /// Drops a completion timestamp carried by a task that is not completed.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if !self.is_completed {
            self.completed_at = None;
        }
        self
    }
}

/// Immutable snapshot of the ordered task list.
///
/// Order is creation order. Cloning is an `Arc` bump, so snapshots can be
/// handed to the persistence layer without copying the tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Task>", into = "Vec<Task>")]
pub struct TaskList(Arc<[Task]>);

impl TaskList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over tasks in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }

    /// Returns the tasks as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.0
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.0.iter().find(|t| t.id == *id)
    }

    /// Copies the tasks into an owned, mutable vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Task> {
        self.0.to_vec()
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self(tasks.into_iter().map(Task::normalized).collect())
    }
}

impl From<TaskList> for Vec<Task> {
    fn from(list: TaskList) -> Self {
        list.to_vec()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
