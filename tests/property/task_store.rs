//! Property-based tests for the task list mutations.
//!
//! Uses proptest to verify, for arbitrary text:
//! 1. Add appends exactly one pending task holding the text as typed.
//! 2. Blank text never changes the list.
//! 3. Edit touches only the text of the target task.
//! 4. Delete removes exactly the target and keeps the order of the rest.

use proptest::prelude::*;
use proptest::sample::Index;
use termtodo::tasks::{TaskError, TaskStore};
use termtodo_core::task::{TaskId, TaskList};

// --- Strategies ---

/// Text with at least one visible character, padding allowed.
fn arb_text() -> impl Strategy<Value = String> {
    "\\s{0,3}[^\\s]\\PC{0,30}"
}

/// Whitespace-only text, including the empty string.
fn arb_blank() -> impl Strategy<Value = String> {
    "[ \\t\\n\\r]{0,8}"
}

/// A store holding the given texts, some of them completed.
fn store_from(texts: &[String], completed: &[bool]) -> TaskStore {
    let mut store = TaskStore::default();
    for (text, done) in texts.iter().zip(completed.iter().chain(std::iter::repeat(&false))) {
        store.add(text).unwrap();
        if *done {
            let id = store.tasks().as_slice().last().unwrap().id.clone();
            store.complete(&id).unwrap();
        }
    }
    store
}

fn arb_store() -> impl Strategy<Value = TaskStore> {
    (
        prop::collection::vec(arb_text(), 1..12),
        prop::collection::vec(any::<bool>(), 0..12),
    )
        .prop_map(|(texts, completed)| store_from(&texts, &completed))
}

fn ids(list: &TaskList) -> Vec<TaskId> {
    list.iter().map(|t| t.id.clone()).collect()
}

proptest! {
    #[test]
    fn add_appends_one_pending_task(mut store in arb_store(), text in arb_text()) {
        let before = store.tasks().clone();
        let after = store.add(&text).unwrap();

        prop_assert_eq!(after.len(), before.len() + 1);
        prop_assert_eq!(&after.as_slice()[..before.len()], before.as_slice());
        let added = &after.as_slice()[before.len()];
        prop_assert_eq!(&added.text, &text);
        prop_assert!(added.is_pending());
        prop_assert!(!ids(&before).contains(&added.id));
    }

    #[test]
    fn blank_text_changes_nothing(
        mut store in arb_store(),
        blank in arb_blank(),
        pick in any::<Index>(),
    ) {
        let before = store.tasks().clone();
        let id = pick.get(before.as_slice()).id.clone();

        prop_assert_eq!(store.add(&blank), Err(TaskError::EmptyText));
        prop_assert_eq!(store.edit(&id, &blank), Err(TaskError::EmptyText));
        prop_assert_eq!(store.tasks(), &before);
    }

    #[test]
    fn edit_changes_only_the_target_text(
        mut store in arb_store(),
        text in arb_text(),
        pick in any::<Index>(),
    ) {
        let before = store.tasks().clone();
        let target = pick.index(before.len());
        let id = before.as_slice()[target].id.clone();

        let after = store.edit(&id, &text).unwrap();

        prop_assert_eq!(ids(&after), ids(&before));
        for (i, (old, new)) in before.iter().zip(after.iter()).enumerate() {
            prop_assert_eq!(new.is_completed, old.is_completed);
            prop_assert_eq!(&new.completed_at, &old.completed_at);
            if i == target {
                prop_assert_eq!(&new.text, &text);
            } else {
                prop_assert_eq!(&new.text, &old.text);
            }
        }
    }

    #[test]
    fn delete_removes_exactly_the_target(mut store in arb_store(), pick in any::<Index>()) {
        let before = store.tasks().clone();
        let target = pick.index(before.len());
        let id = before.as_slice()[target].id.clone();

        let after = store.delete(&id).unwrap();

        let mut expected = before.to_vec();
        expected.remove(target);
        prop_assert_eq!(after.as_slice(), expected.as_slice());
        prop_assert!(after.get(&id).is_none());
        prop_assert_eq!(store.delete(&id), Err(TaskError::NotFound(id.to_string())));
    }
}
