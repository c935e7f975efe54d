//! Background save pipeline for task list snapshots.
//!
//! The UI thread submits a snapshot after every mutation and never waits for
//! the write. A single writer task persists snapshots one at a time; any
//! snapshots submitted while a write is in flight collapse into the newest
//! one, so the stored value always converges on the latest state.
//!
//! ```text
//! UI loop ── submit(snapshot) ──► watch slot (latest wins) ──► writer task ──► KeyValueStore
//!                                                                  │
//!           flush() ◄────────────── settled generation ◄───────────┘
//! ```

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use termtodo_core::codec;
use termtodo_core::task::TaskList;

use super::KeyValueStore;

/// Latest submitted snapshot, numbered by submission order.
#[derive(Debug, Clone, Default)]
struct Submission {
    generation: u64,
    snapshot: Option<TaskList>,
}

/// Single-writer, latest-wins save queue.
///
/// Failed writes are logged and dropped: the in-memory list stays the
/// source of truth and the next submission overwrites the stored value.
pub struct SaveQueue {
    submissions: watch::Sender<Submission>,
    settled: watch::Receiver<u64>,
    writer: JoinHandle<()>,
}

impl SaveQueue {
    /// Spawn the writer task persisting snapshots under `key` in `store`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn<S>(store: Arc<S>, key: impl Into<String>) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let (submissions, rx) = watch::channel(Submission::default());
        let (settled_tx, settled) = watch::channel(0);
        let writer = tokio::spawn(run_writer(store, key.into(), rx, settled_tx));
        Self {
            submissions,
            settled,
            writer,
        }
    }

    /// Queue `snapshot` for persistence. Never blocks.
    ///
    /// Returns the generation number of this submission.
    pub fn submit(&self, snapshot: TaskList) -> u64 {
        let mut generation = 0;
        self.submissions.send_modify(|s| {
            s.generation += 1;
            s.snapshot = Some(snapshot);
            generation = s.generation;
        });
        tracing::trace!(generation, "snapshot queued for save");
        generation
    }

    /// Returns `true` once every submitted snapshot has been written or
    /// has failed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        *self.settled.borrow() >= self.submissions.borrow().generation
    }

    /// Wait until everything submitted so far has been settled.
    pub async fn flush(&self) {
        let target = self.submissions.borrow().generation;
        let mut settled = self.settled.clone();
        // An error means the writer is gone; nothing left to wait for.
        let _ = settled.wait_for(|g| *g >= target).await;
    }

    /// Write out the last pending snapshot and stop the writer.
    pub async fn shutdown(self) {
        let Self {
            submissions,
            writer,
            ..
        } = self;
        drop(submissions);
        if let Err(e) = writer.await {
            tracing::error!(error = %e, "save writer task failed");
        }
    }
}

async fn run_writer<S: KeyValueStore>(
    store: Arc<S>,
    key: String,
    mut submissions: watch::Receiver<Submission>,
    settled: watch::Sender<u64>,
) {
    // `changed` still yields a final unseen value after the sender is dropped.
    while submissions.changed().await.is_ok() {
        let Submission {
            generation,
            snapshot,
        } = submissions.borrow_and_update().clone();
        if let Some(snapshot) = snapshot {
            write_snapshot(store.as_ref(), &key, &snapshot).await;
        }
        settled.send_replace(generation);
    }
    tracing::debug!(key = %key, "save writer stopped");
}

async fn write_snapshot<S: KeyValueStore>(store: &S, key: &str, snapshot: &TaskList) {
    let json = match codec::encode(snapshot) {
        Ok(json) => json,
        Err(err) => {
            tracing::error!(key, error = %err, "could not encode tasks for saving");
            return;
        }
    };
    match store.set(key, &json).await {
        Ok(()) => tracing::debug!(key, count = snapshot.len(), "tasks saved"),
        Err(err) => tracing::warn!(
            key,
            error = %err,
            "saving tasks failed, keeping in-memory list"
        ),
    }
}
