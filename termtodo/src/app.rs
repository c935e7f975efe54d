//! Application state and event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use termtodo_core::task::{Task, TaskId, TaskList};

use crate::startup::StartupEvent;
use crate::tasks::{TaskError, TaskStore};
use crate::weather::WeatherState;

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// New-task input box is focused (default).
    Input,
    /// Task list is focused.
    Tasks,
}

/// Single-line text buffer with a cursor.
///
/// The cursor is a character index, so multi-byte input edits correctly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    cursor: usize,
}

impl LineEditor {
    /// Create an empty editor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor holding `text` with the cursor at the end.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position (character index).
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Clear the contents.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns `false` for keys it does not handle.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c);
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            _ => return false,
        }
        true
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }
}

/// Overlay dialog shown above the main screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// "Complete task?" confirmation.
    ConfirmComplete {
        /// Task to complete on confirmation.
        id: TaskId,
        /// Task text, shown in the prompt.
        text: String,
    },
    /// Edit dialog pre-filled with the task text.
    Edit {
        /// Task being edited.
        id: TaskId,
        /// Edited text.
        editor: LineEditor,
    },
}

/// Main application state.
pub struct App {
    /// New-task input.
    pub input: LineEditor,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Selected row in the task list (pending rows first, then completed).
    pub selected: usize,
    /// Open dialog, if any.
    pub modal: Option<Modal>,
    /// Weather card contents.
    pub weather: WeatherState,
    /// Unit label appended to the temperature.
    pub temperature_suffix: &'static str,
    /// Whether the stored task list has been read.
    pub tasks_loaded: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    store: TaskStore,
}

impl App {
    /// Create the application around `store`, waiting for the weather.
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        Self {
            input: LineEditor::new(),
            focus: PanelFocus::Input,
            selected: 0,
            modal: None,
            weather: WeatherState::Loading,
            temperature_suffix: "\u{b0}C",
            tasks_loaded: false,
            should_quit: false,
            store,
        }
    }

    /// Set the initial weather card state.
    #[must_use]
    pub fn with_weather(mut self, weather: WeatherState) -> Self {
        self.weather = weather;
        self
    }

    /// Set the unit label shown after the temperature.
    #[must_use]
    pub const fn with_temperature_suffix(mut self, suffix: &'static str) -> Self {
        self.temperature_suffix = suffix;
        self
    }

    /// The task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The task under the selection, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.store.partition().rows().nth(self.selected)
    }

    /// Apply a result from a startup task.
    ///
    /// Returns a snapshot to persist when tasks added before the load
    /// finished had to be merged into the loaded list.
    pub fn apply_startup_event(&mut self, event: StartupEvent) -> Option<TaskList> {
        match event {
            StartupEvent::TasksLoaded(loaded) => {
                tracing::info!(count = loaded.len(), "tasks loaded");
                self.tasks_loaded = true;
                let merged = self.store.restore(loaded);
                self.clamp_selection();
                merged
            }
            StartupEvent::WeatherResolved(state) => {
                self.weather = state;
                None
            }
        }
    }

    /// Handle a key event.
    ///
    /// Returns the new task list when the key changed it, for the caller
    /// to hand to the save queue.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<TaskList> {
        let changed = self.dispatch_key(key);
        // Nothing is saved before the stored list has been read; the
        // merge in `apply_startup_event` is saved instead.
        changed.filter(|_| self.tasks_loaded)
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> Option<TaskList> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        if self.modal.is_some() {
            return self.handle_modal_key(key);
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
                return None;
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::Input => self.handle_input_key(key),
            PanelFocus::Tasks => self.handle_tasks_key(key),
        }
    }

    /// Handle key event when the input box is focused.
    fn handle_input_key(&mut self, key: KeyEvent) -> Option<TaskList> {
        if key.code == KeyCode::Enter {
            return self.submit_task();
        }
        self.input.handle_key(key);
        None
    }

    /// Handle key event when the task list is focused.
    fn handle_tasks_key(&mut self, key: KeyEvent) -> Option<TaskList> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.store.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('c' | ' ') | KeyCode::Enter => {
                self.open_confirm_complete();
                None
            }
            KeyCode::Char('e') => {
                self.open_edit();
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            _ => None,
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<TaskList> {
        match self.modal.take()? {
            Modal::ConfirmComplete { id, text } => match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                    let saved = saved_or_logged(self.store.complete(&id), &id);
                    self.clamp_selection();
                    saved
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => None,
                _ => {
                    self.modal = Some(Modal::ConfirmComplete { id, text });
                    None
                }
            },
            Modal::Edit { id, mut editor } => match key.code {
                KeyCode::Esc => None,
                KeyCode::Enter => match self.store.edit(&id, editor.text()) {
                    Ok(saved) => Some(saved),
                    Err(TaskError::EmptyText) => {
                        self.modal = Some(Modal::Edit { id, editor });
                        None
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "edit ignored");
                        None
                    }
                },
                _ => {
                    editor.handle_key(key);
                    self.modal = Some(Modal::Edit { id, editor });
                    None
                }
            },
        }
    }

    /// Add the input as a new task.
    fn submit_task(&mut self) -> Option<TaskList> {
        match self.store.add(self.input.text()) {
            Ok(saved) => {
                self.input.clear();
                Some(saved)
            }
            Err(err) => {
                tracing::debug!(error = %err, "add ignored");
                None
            }
        }
    }

    fn open_confirm_complete(&mut self) {
        if let Some(task) = self.selected_task().filter(|t| t.is_pending()) {
            self.modal = Some(Modal::ConfirmComplete {
                id: task.id.clone(),
                text: task.text.clone(),
            });
        }
    }

    fn open_edit(&mut self) {
        if let Some(task) = self.selected_task().filter(|t| t.is_pending()) {
            self.modal = Some(Modal::Edit {
                id: task.id.clone(),
                editor: LineEditor::with_text(task.text.clone()),
            });
        }
    }

    fn delete_selected(&mut self) -> Option<TaskList> {
        let id = self.selected_task()?.id.clone();
        let saved = saved_or_logged(self.store.delete(&id), &id);
        self.clamp_selection();
        saved
    }

    const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::Tasks,
            PanelFocus::Tasks => PanelFocus::Input,
        };
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.store.len().saturating_sub(1));
    }
}

/// Keep the snapshot of a successful change; log and drop a no-op.
fn saved_or_logged(result: Result<TaskList, TaskError>, id: &TaskId) -> Option<TaskList> {
    match result {
        Ok(saved) => Some(saved),
        Err(err) => {
            tracing::debug!(task_id = %id, error = %err, "task change ignored");
            None
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(TaskStore::default())
    }
}
