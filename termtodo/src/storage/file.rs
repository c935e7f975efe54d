//! Directory-backed key-value store.
//!
//! Each key is one JSON file in the data directory. Key characters outside
//! `[A-Za-z0-9._-]` are written as `%XX` escapes, so `@todoList:tasks` lives
//! in `%40todoList%3Atasks.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use super::{KeyValueStore, StoreError};

/// File extension of stored values.
const VALUE_EXTENSION: &str = "json";

/// [`KeyValueStore`] that keeps one file per key under a directory.
///
/// Writes go to a temporary sibling file which is synced and then renamed
/// over the target, so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the value files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] for an empty key.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self
            .dir
            .join(format!("{}.{VALUE_EXTENSION}", escape_key(key))))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed(format!("{}: {e}", path.display()))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let write_err =
            |e: std::io::Error| StoreError::WriteFailed(format!("{}: {e}", path.display()));

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.dir.display())))?;

        let temp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&temp).await.map_err(write_err)?;
        file.write_all(value.as_bytes()).await.map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;
        drop(file);
        tokio::fs::rename(&temp, &path).await.map_err(write_err)?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "value written");
        Ok(())
    }
}

/// Escape a key into a portable file stem.
fn escape_key(key: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}
