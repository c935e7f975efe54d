//! Property-based tests for the task model and its JSON codec.
//!
//! Uses proptest to verify:
//! 1. Any task list survives encode → decode unchanged.
//! 2. Arbitrary text never causes a panic in `decode`.
//! 3. Decoding restores the "pending ⇒ no timestamp" invariant.

use proptest::prelude::*;
use termtodo_core::codec;
use termtodo_core::task::{Task, TaskId, TaskList};

// --- Strategies ---

/// Ids as written by this app (UUIDs) or by older clients (timestamps).
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    prop_oneof![
        any::<u128>().prop_map(|n| TaskId::from_string(uuid::Uuid::from_u128(n).to_string())),
        (1_000_000_000_000_u64..2_000_000_000_000).prop_map(|n| TaskId::from_string(n.to_string())),
    ]
}

/// Well-formed tasks: completed iff a timestamp is present.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        arb_task_id(),
        "[^\\s].{0,40}",
        proptest::option::of("[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}, [0-9]{2}:[0-9]{2}:[0-9]{2}"),
    )
        .prop_map(|(id, text, completed_at)| Task {
            id,
            text,
            is_completed: completed_at.is_some(),
            completed_at,
        })
}

fn arb_task_list() -> impl Strategy<Value = TaskList> {
    prop::collection::vec(arb_task(), 0..20).prop_map(TaskList::from)
}

proptest! {
    #[test]
    fn encode_decode_preserves_list(list in arb_task_list()) {
        let json = codec::encode(&list).unwrap();
        let decoded = codec::decode(&json).unwrap();
        prop_assert_eq!(decoded, list);
    }

    #[test]
    fn decode_never_panics(input in ".{0,200}") {
        let _ = codec::decode(&input);
    }

    #[test]
    fn decode_drops_timestamp_of_pending_task(
        id in arb_task_id(),
        text in "[a-z]{1,10}",
        stamp in "[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}",
    ) {
        let json = serde_json::json!([{
            "id": id.as_str(),
            "text": text,
            "isCompleted": false,
            "completedAt": stamp,
        }])
        .to_string();
        let decoded = codec::decode(&json).unwrap();
        prop_assert_eq!(decoded.len(), 1);
        prop_assert!(decoded.as_slice()[0].completed_at.is_none());
    }
}
