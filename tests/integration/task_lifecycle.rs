//! Integration tests for the task list lifecycle.
//!
//! Drives `TaskStore` through add, complete, edit, and delete and checks
//! the Pending / Completed partition after each step.

use chrono::{Local, TimeZone};

use termtodo::tasks::{SectionKind, TaskError, TaskStore};
use termtodo_core::task::TaskId;

fn texts(section: &termtodo::tasks::Section<'_>) -> Vec<String> {
    section.tasks.iter().map(|t| t.text.clone()).collect()
}

#[test]
fn buy_milk_moves_from_pending_to_completed() {
    let mut store = TaskStore::default();

    store.add("Buy milk").expect("add failed");
    let partition = store.partition();
    assert_eq!(texts(&partition.pending), ["Buy milk"]);
    assert!(partition.completed.is_empty());
    assert!(!partition.pending.tasks[0].is_completed);
    let id = partition.pending.tasks[0].id.clone();

    store.complete(&id).expect("complete failed");
    let partition = store.partition();
    assert!(partition.pending.is_empty());
    assert_eq!(texts(&partition.completed), ["Buy milk"]);
    let done = partition.completed.tasks[0];
    assert!(done.is_completed);
    assert!(done.completed_at.is_some());
}

#[test]
fn completed_task_never_returns_to_pending() {
    let mut store = TaskStore::default();
    store.add("a").unwrap();
    let id = store.tasks().as_slice()[0].id.clone();
    store.complete(&id).unwrap();

    store.edit(&id, "renamed").unwrap();
    assert_eq!(
        store.complete(&id),
        Err(TaskError::AlreadyCompleted(id.to_string()))
    );
    let partition = store.partition();
    assert!(partition.pending.is_empty());
    assert_eq!(texts(&partition.completed), ["renamed"]);
}

#[test]
fn completion_timestamp_uses_configured_format() {
    let mut store = TaskStore::new("%Y-%m-%d %H:%M");
    store.add("a").unwrap();
    let id = store.tasks().as_slice()[0].id.clone();
    let at = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 0).unwrap();

    let saved = store.complete_at(&id, &at).unwrap();
    assert_eq!(
        saved.as_slice()[0].completed_at.as_deref(),
        Some("2026-03-07 09:05")
    );
}

#[test]
fn edit_preserves_identity_and_completion() {
    let mut store = TaskStore::default();
    store.add("first").unwrap();
    store.add("second").unwrap();
    let id = store.tasks().as_slice()[1].id.clone();
    store.complete(&id).unwrap();
    let before = store.get(&id).cloned().unwrap();

    store.edit(&id, "  second, edited  ").unwrap();
    let after = store.get(&id).unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.text, "  second, edited  ");
    assert_eq!(after.is_completed, before.is_completed);
    assert_eq!(after.completed_at, before.completed_at);
}

#[test]
fn delete_removes_exactly_one_task() {
    let mut store = TaskStore::default();
    for t in ["a", "b", "c"] {
        store.add(t).unwrap();
    }
    let id = store.tasks().as_slice()[1].id.clone();

    let saved = store.delete(&id).unwrap();
    let remaining: Vec<&str> = saved.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(remaining, ["a", "c"]);

    let unknown = TaskId::from("missing");
    assert!(matches!(store.delete(&unknown), Err(TaskError::NotFound(_))));
    assert_eq!(store.len(), 2);
}

#[test]
fn blank_input_changes_nothing() {
    let mut store = TaskStore::default();
    store.add("keep").unwrap();
    let before = store.tasks().clone();

    for blank in ["", " ", "\t\n"] {
        assert_eq!(store.add(blank), Err(TaskError::EmptyText));
    }
    let id = before.as_slice()[0].id.clone();
    assert_eq!(store.edit(&id, "   "), Err(TaskError::EmptyText));
    assert_eq!(store.tasks(), &before);
}

#[test]
fn completion_keeps_insertion_order_within_sections() {
    let mut store = TaskStore::default();
    for t in ["a", "b", "c", "d"] {
        store.add(t).unwrap();
    }
    let ids: Vec<TaskId> = store.tasks().iter().map(|t| t.id.clone()).collect();
    store.complete(&ids[2]).unwrap();
    store.complete(&ids[0]).unwrap();

    let partition = store.partition();
    assert_eq!(partition.pending.kind, SectionKind::Pending);
    assert_eq!(texts(&partition.pending), ["b", "d"]);
    assert_eq!(texts(&partition.completed), ["a", "c"]);
    assert_eq!(partition.pending.title(), "Pending (2)");
    assert_eq!(partition.completed.title(), "Completed (2)");

    // Underlying list order is unchanged by completion.
    let order: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(order, ["a", "b", "c", "d"]);
}

#[test]
fn previous_snapshots_are_unaffected_by_later_changes() {
    let mut store = TaskStore::default();
    let first = store.add("a").unwrap();
    store.add("b").unwrap();
    let id = first.as_slice()[0].id.clone();
    store.complete(&id).unwrap();

    assert_eq!(first.len(), 1);
    assert!(first.as_slice()[0].is_pending());
}
