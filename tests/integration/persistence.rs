//! Integration tests for saving and restoring the task list on disk.
//!
//! These tests validate:
//! - A list saved through the `SaveQueue` is restored by `load_tasks`
//! - Restored tasks keep ids, text, flags, and timestamps
//! - The stored JSON keeps the field names other clients read
//! - Corrupt or unreadable storage starts the app with an empty list
//! - A failing store never disturbs the in-memory list

use std::sync::Arc;

use termtodo::storage::{FileStore, KeyValueStore, SaveQueue, StoreError, TASKS_STORAGE_KEY};
use termtodo::tasks::{TaskStore, load_tasks};
use termtodo_core::task::TaskList;

#[tokio::test]
async fn saved_list_is_restored_after_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    // First session.
    let store = Arc::new(FileStore::new(dir.path()));
    let queue = SaveQueue::spawn(Arc::clone(&store), TASKS_STORAGE_KEY);
    let mut tasks = TaskStore::default();
    queue.submit(tasks.add("Buy milk").unwrap());
    let saved = tasks.add("Walk dog").unwrap();
    queue.submit(saved);
    let id = tasks.tasks().as_slice()[0].id.clone();
    let last = tasks.complete(&id).unwrap();
    queue.submit(last.clone());
    queue.shutdown().await;

    // Second session, fresh store over the same directory.
    let reopened = FileStore::new(dir.path());
    let loaded = load_tasks(&reopened, TASKS_STORAGE_KEY).await;
    assert_eq!(loaded, last);
    assert!(loaded.as_slice()[0].completed_at.is_some());
    assert!(loaded.as_slice()[1].is_pending());
}

#[tokio::test]
async fn stored_json_uses_camel_case_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));
    let queue = SaveQueue::spawn(Arc::clone(&store), TASKS_STORAGE_KEY);
    let mut tasks = TaskStore::default();
    queue.submit(tasks.add("Buy milk").unwrap());
    queue.flush().await;

    let raw = store.get(TASKS_STORAGE_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let task = &json[0];
    assert_eq!(task["text"], "Buy milk");
    assert_eq!(task["isCompleted"], false);
    assert!(task["completedAt"].is_null());
    assert!(task["id"].is_string());
}

#[tokio::test]
async fn list_written_by_mobile_app_loads() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store
        .set(
            TASKS_STORAGE_KEY,
            r#"[{"id":"1712345678901","text":"Comprar pan","isCompleted":true,"completedAt":"5/4/2024, 19:01:02"},
                {"id":"1712345678999","text":"Llamar","isCompleted":false,"completedAt":null}]"#,
        )
        .await
        .unwrap();

    let loaded = load_tasks(&store, TASKS_STORAGE_KEY).await;
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.as_slice()[0].id.as_str(), "1712345678901");
    assert_eq!(
        loaded.as_slice()[0].completed_at.as_deref(),
        Some("5/4/2024, 19:01:02")
    );
    assert!(loaded.as_slice()[1].is_pending());
}

#[tokio::test]
async fn corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.set(TASKS_STORAGE_KEY, "{not json").await.unwrap();

    assert!(load_tasks(&store, TASKS_STORAGE_KEY).await.is_empty());
}

#[tokio::test]
async fn unreadable_path_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    // A directory where the value file should be makes the read fail.
    let path = store.path_for(TASKS_STORAGE_KEY).unwrap();
    std::fs::create_dir_all(&path).unwrap();

    assert!(store.get(TASKS_STORAGE_KEY).await.is_err());
    assert!(load_tasks(&store, TASKS_STORAGE_KEY).await.is_empty());
}

/// Store whose every operation fails.
struct Unavailable;

impl KeyValueStore for Unavailable {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

#[tokio::test]
async fn failing_store_leaves_memory_authoritative() {
    let queue = SaveQueue::spawn(Arc::new(Unavailable), TASKS_STORAGE_KEY);
    let mut tasks = TaskStore::default();

    let snapshot = tasks.add("still here").unwrap();
    queue.submit(snapshot.clone());
    queue.flush().await;

    assert_eq!(tasks.tasks(), &snapshot);
    assert_eq!(tasks.len(), 1);
    assert!(queue.is_settled());
    queue.shutdown().await;
}

#[tokio::test]
async fn lists_under_different_keys_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));
    let queue = SaveQueue::spawn(Arc::clone(&store), "other-list");
    let mut tasks = TaskStore::default();
    queue.submit(tasks.add("x").unwrap());
    queue.shutdown().await;

    assert_eq!(
        load_tasks(store.as_ref(), TASKS_STORAGE_KEY).await,
        TaskList::new()
    );
    assert_eq!(load_tasks(store.as_ref(), "other-list").await.len(), 1);
}
