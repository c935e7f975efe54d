//! Task store: add, complete, edit, delete, and startup load.

use chrono::{DateTime, Local, TimeZone};

use termtodo_core::codec;
use termtodo_core::task::{Task, TaskId, TaskList};

use super::TaskError;
use super::partition::{Partition, partition};
use crate::storage::KeyValueStore;

/// Default `completed_at` format: day/month/year, 24h time, unpadded day and
/// month (`"9/10/2026, 14:03:22"`).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-d/%-m/%Y, %H:%M:%S";

/// Owns the ordered task list and applies user mutations.
///
/// Mutations never touch a previously returned snapshot; each one that
/// changes state swaps in a new [`TaskList`] and returns it.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: TaskList,
    timestamp_format: String,
}

impl TaskStore {
    /// Creates an empty store that stamps completions with `timestamp_format`.
    #[must_use]
    pub fn new(timestamp_format: impl Into<String>) -> Self {
        Self::with_tasks(TaskList::new(), timestamp_format)
    }

    /// Creates a store holding an existing list.
    #[must_use]
    pub fn with_tasks(tasks: TaskList, timestamp_format: impl Into<String>) -> Self {
        Self {
            tasks,
            timestamp_format: timestamp_format.into(),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub const fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if there are no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Splits the list into Pending and Completed sections.
    #[must_use]
    pub fn partition(&self) -> Partition<'_> {
        partition(&self.tasks)
    }

    /// Appends a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::EmptyText`] if `text` is blank.
    pub fn add(&mut self, text: &str) -> Result<TaskList, TaskError> {
        non_blank(text)?;
        let task = Task::new(text);
        tracing::debug!(task_id = %task.id, "task added");

        let mut tasks = self.tasks.to_vec();
        tasks.push(task);
        Ok(self.commit(tasks))
    }

    /// Marks a task completed, stamped with the current local time.
    ///
    /// Only call this once the user has confirmed the completion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] for an unknown id, or
    /// [`TaskError::AlreadyCompleted`] if the task is already done.
    pub fn complete(&mut self, id: &TaskId) -> Result<TaskList, TaskError> {
        self.complete_at(id, &Local::now())
    }

    /// Marks a task completed, stamped with the given time.
    ///
    /// # Errors
    ///
    /// Same as [`complete`](Self::complete).
    pub fn complete_at<Tz>(&mut self, id: &TaskId, at: &DateTime<Tz>) -> Result<TaskList, TaskError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut tasks = self.tasks.to_vec();
        let task = find_mut(&mut tasks, id)?;
        if task.is_completed {
            return Err(TaskError::AlreadyCompleted(id.to_string()));
        }
        task.is_completed = true;
        task.completed_at = Some(at.format(&self.timestamp_format).to_string());
        tracing::debug!(task_id = %id, "task completed");
        Ok(self.commit(tasks))
    }

    /// Replaces a task's text, keeping its id and completion state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::EmptyText`] if `new_text` is blank, or
    /// [`TaskError::NotFound`] for an unknown id.
    pub fn edit(&mut self, id: &TaskId, new_text: &str) -> Result<TaskList, TaskError> {
        non_blank(new_text)?;
        let mut tasks = self.tasks.to_vec();
        find_mut(&mut tasks, id)?.text = new_text.to_string();
        tracing::debug!(task_id = %id, "task edited");
        Ok(self.commit(tasks))
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: &TaskId) -> Result<TaskList, TaskError> {
        let mut tasks = self.tasks.to_vec();
        let before = tasks.len();
        tasks.retain(|t| t.id != *id);
        if tasks.len() == before {
            return Err(TaskError::NotFound(id.to_string()));
        }
        tracing::debug!(task_id = %id, "task deleted");
        Ok(self.commit(tasks))
    }

    /// Installs the list read from storage at startup.
    ///
    /// Tasks added before the load finished are kept after the loaded ones.
    /// Returns a snapshot to persist only when such tasks existed, since the
    /// stored value is otherwise already current.
    pub fn restore(&mut self, loaded: TaskList) -> Option<TaskList> {
        if self.tasks.is_empty() {
            self.tasks = loaded;
            return None;
        }
        let session = std::mem::take(&mut self.tasks);
        let mut tasks = loaded.to_vec();
        tasks.extend(
            session
                .iter()
                .filter(|t| loaded.get(&t.id).is_none())
                .cloned(),
        );
        Some(self.commit(tasks))
    }

    fn commit(&mut self, tasks: Vec<Task>) -> TaskList {
        self.tasks = TaskList::from(tasks);
        self.tasks.clone()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_FORMAT)
    }
}

/// Reads the persisted task list.
///
/// A missing value yields an empty list. Read and decode failures are
/// logged and also yield an empty list, so startup never fails on storage.
pub async fn load_tasks<S: KeyValueStore>(store: &S, key: &str) -> TaskList {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::info!(key, "no stored tasks, starting empty");
            return TaskList::new();
        }
        Err(err) => {
            tracing::error!(key, error = %err, "failed to read stored tasks");
            return TaskList::new();
        }
    };

    match codec::decode(&raw) {
        Ok(list) => {
            tracing::info!(key, count = list.len(), "loaded stored tasks");
            list
        }
        Err(err) => {
            tracing::error!(key, error = %err, "stored tasks are unreadable, starting empty");
            TaskList::new()
        }
    }
}

/// Blank text never reaches the list; non-blank text is stored as typed.
fn non_blank(text: &str) -> Result<(), TaskError> {
    if text.trim().is_empty() {
        Err(TaskError::EmptyText)
    } else {
        Ok(())
    }
}

fn find_mut<'a>(tasks: &'a mut [Task], id: &TaskId) -> Result<&'a mut Task, TaskError> {
    tasks
        .iter_mut()
        .find(|t| t.id == *id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))
}
