//! Process-local key-value store.

use std::collections::HashMap;

use tokio::sync::Mutex;

use super::{KeyValueStore, StoreError};

/// In-memory implementation of [`KeyValueStore`].
///
/// Used by tests and by `--ephemeral` runs. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Create a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
