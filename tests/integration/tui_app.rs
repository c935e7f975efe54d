//! Integration tests for the TUI key flows.
//!
//! Drives `App` with crossterm key events the way the main loop does, and
//! feeds every returned snapshot through a real `SaveQueue`.
//!
//! These tests validate:
//! - Completing asks for confirmation; declining changes nothing
//! - The edit modal ignores blank text and stays open
//! - Delete needs no confirmation
//! - What is saved matches what is on screen

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use termtodo::app::{App, Modal, PanelFocus};
use termtodo::startup::StartupEvent;
use termtodo::storage::{InMemoryStore, KeyValueStore, SaveQueue};
use termtodo_core::codec;
use termtodo_core::task::TaskList;

const KEY: &str = "@todoList:tasks";

/// App plus a save queue, wired like the main loop.
struct Harness {
    app: App,
    store: Arc<InMemoryStore>,
    saves: SaveQueue,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let saves = SaveQueue::spawn(Arc::clone(&store), KEY);
        let mut app = App::default();
        app.apply_startup_event(StartupEvent::TasksLoaded(TaskList::new()));
        Self { app, store, saves }
    }

    fn press(&mut self, code: KeyCode) {
        if let Some(snapshot) = self.app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE)) {
            self.saves.submit(snapshot);
        }
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    fn add(&mut self, text: &str) {
        self.type_text(text);
        self.press(KeyCode::Enter);
    }

    async fn persisted(&self) -> TaskList {
        self.saves.flush().await;
        let raw = self.store.get(KEY).await.unwrap().unwrap_or_default();
        if raw.is_empty() {
            TaskList::new()
        } else {
            codec::decode(&raw).unwrap()
        }
    }
}

#[tokio::test]
async fn confirmed_completion_is_saved() {
    let mut h = Harness::new();
    h.add("Buy milk");
    h.press(KeyCode::Tab);
    assert_eq!(h.app.focus, PanelFocus::Tasks);

    h.press(KeyCode::Char('c'));
    match &h.app.modal {
        Some(Modal::ConfirmComplete { text, .. }) => assert_eq!(text, "Buy milk"),
        other => panic!("expected confirmation, got {other:?}"),
    }
    h.press(KeyCode::Char('y'));
    assert!(h.app.modal.is_none());

    let saved = h.persisted().await;
    assert_eq!(&saved, h.app.store().tasks());
    assert!(saved.as_slice()[0].is_completed);
    assert!(saved.as_slice()[0].completed_at.is_some());
}

#[tokio::test]
async fn declined_completion_changes_nothing() {
    let mut h = Harness::new();
    h.add("Buy milk");
    let before = h.persisted().await;
    h.press(KeyCode::Tab);

    for decline in [KeyCode::Char('n'), KeyCode::Esc] {
        h.press(KeyCode::Enter);
        assert!(h.app.modal.is_some());
        h.press(decline);
        assert!(h.app.modal.is_none());
    }

    assert!(!h.app.should_quit);
    assert_eq!(h.app.store().tasks(), &before);
    assert_eq!(h.persisted().await, before);
}

#[tokio::test]
async fn edit_modal_ignores_blank_text() {
    let mut h = Harness::new();
    h.add("Buy milk");
    h.press(KeyCode::Tab);
    h.press(KeyCode::Char('e'));

    for _ in "Buy milk".chars() {
        h.press(KeyCode::Backspace);
    }
    h.type_text("   ");
    h.press(KeyCode::Enter);
    assert!(
        matches!(h.app.modal, Some(Modal::Edit { .. })),
        "blank edit must keep the modal open"
    );
    assert_eq!(h.app.store().tasks().as_slice()[0].text, "Buy milk");

    h.press(KeyCode::Home);
    for _ in 0..3 {
        h.press(KeyCode::Delete);
    }
    h.type_text("Buy oat milk");
    h.press(KeyCode::Enter);
    assert!(h.app.modal.is_none());
    assert_eq!(h.persisted().await.as_slice()[0].text, "Buy oat milk");
}

#[tokio::test]
async fn edit_escape_discards_changes() {
    let mut h = Harness::new();
    h.add("Buy milk");
    h.press(KeyCode::Tab);
    h.press(KeyCode::Char('e'));
    h.type_text(" and eggs");
    h.press(KeyCode::Esc);

    assert!(h.app.modal.is_none());
    assert!(!h.app.should_quit);
    assert_eq!(h.app.store().tasks().as_slice()[0].text, "Buy milk");
}

#[tokio::test]
async fn delete_needs_no_confirmation() {
    let mut h = Harness::new();
    h.add("one");
    h.add("two");
    h.press(KeyCode::Tab);
    h.press(KeyCode::Down);
    h.press(KeyCode::Char('d'));

    assert!(h.app.modal.is_none());
    let saved = h.persisted().await;
    let texts: Vec<&str> = saved.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["one"]);
}

#[tokio::test]
async fn completed_tasks_can_still_be_deleted() {
    let mut h = Harness::new();
    h.add("done soon");
    h.press(KeyCode::Tab);
    h.press(KeyCode::Enter);
    h.press(KeyCode::Enter);
    assert!(h.app.store().tasks().as_slice()[0].is_completed);

    h.press(KeyCode::Delete);
    assert!(h.app.store().is_empty());
    assert!(h.persisted().await.is_empty());
}

#[tokio::test]
async fn blank_add_saves_nothing() {
    let mut h = Harness::new();
    h.add("   ");
    assert!(h.app.store().is_empty());
    assert!(h.saves.is_settled());
    assert!(h.store.get(KEY).await.unwrap().is_none());
}
