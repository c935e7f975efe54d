//! Derived Pending / Completed view of the task list.

use termtodo_core::task::{Task, TaskList};

/// Which section a task is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Tasks not yet completed.
    Pending,
    /// Completed tasks.
    Completed,
}

impl SectionKind {
    /// Section label without the count.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

/// One section of the partition, in insertion order.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    /// Which section this is.
    pub kind: SectionKind,
    /// Tasks in the section.
    pub tasks: Vec<&'a Task>,
}

impl Section<'_> {
    /// Header text with count, e.g. `"Pending (3)"`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} ({})", self.kind.label(), self.tasks.len())
    }

    /// Number of tasks in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the section has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// The task list split for display.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    /// Tasks with `is_completed == false`.
    pub pending: Section<'a>,
    /// Tasks with `is_completed == true`.
    pub completed: Section<'a>,
}

impl<'a> Partition<'a> {
    /// Both sections, Pending first.
    #[must_use]
    pub const fn sections(&self) -> [&Section<'a>; 2] {
        [&self.pending, &self.completed]
    }

    /// All tasks in display order: pending, then completed.
    pub fn rows(&self) -> impl Iterator<Item = &'a Task> + '_ {
        self.pending
            .tasks
            .iter()
            .chain(self.completed.tasks.iter())
            .copied()
    }

    /// Total number of tasks across both sections.
    #[must_use]
    pub fn total(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    /// Returns `true` if there are no tasks at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Splits `list` into Pending and Completed sections.
#[must_use]
pub fn partition(list: &TaskList) -> Partition<'_> {
    let (completed, pending): (Vec<&Task>, Vec<&Task>) =
        list.iter().partition(|t| t.is_completed);
    Partition {
        pending: Section {
            kind: SectionKind::Pending,
            tasks: pending,
        },
        completed: Section {
            kind: SectionKind::Completed,
            tasks: completed,
        },
    }
}
