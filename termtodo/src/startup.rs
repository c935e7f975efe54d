//! Launch-time background work for the TUI.
//!
//! Two independent operations run at launch: loading the persisted task
//! list and the one-shot weather lookup. Each runs on its own tokio task and
//! reports a single [`StartupEvent`] to the main thread, which drains the
//! channel on each tick of the poll-based event loop.
//!
//! ```text
//! TUI (main thread)  ←── StartupEvent ───  load task
//!                    ←── StartupEvent ───  weather task
//! ```
//!
//! Neither task blocks the other or the UI, and neither is cancelled.

use std::sync::Arc;

use tokio::sync::mpsc;

use termtodo_core::task::TaskList;

use crate::storage::KeyValueStore;
use crate::tasks::load_tasks;
use crate::weather::{LocationProvider, WeatherProvider, WeatherState, fetch_weather};

/// Room for both startup events without the senders ever waiting.
const STARTUP_CHANNEL_CAPACITY: usize = 4;

/// Results delivered from the startup tasks to the TUI main loop.
#[derive(Debug, Clone, PartialEq)]
pub enum StartupEvent {
    /// The persisted task list was read (empty on any failure).
    TasksLoaded(TaskList),
    /// The weather lookup finished.
    WeatherResolved(WeatherState),
}

/// Weather lookup collaborators; `None` disables the lookup.
pub type WeatherSources<L, W> = Option<(L, W)>;

/// Spawn the load and weather tasks and return the event receiver.
///
/// When `weather` is `None`, [`WeatherState::Disabled`] is reported
/// without any lookup. Must be called from within a tokio runtime.
pub fn spawn_startup<S, L, W>(
    store: Arc<S>,
    key: String,
    weather: WeatherSources<L, W>,
) -> mpsc::Receiver<StartupEvent>
where
    S: KeyValueStore + 'static,
    L: LocationProvider + 'static,
    W: WeatherProvider + 'static,
{
    let (evt_tx, evt_rx) = mpsc::channel(STARTUP_CHANNEL_CAPACITY);

    let load_tx = evt_tx.clone();
    tokio::spawn(async move {
        let tasks = load_tasks(store.as_ref(), &key).await;
        if load_tx.send(StartupEvent::TasksLoaded(tasks)).await.is_err() {
            tracing::debug!("ui gone before tasks loaded");
        }
    });

    tokio::spawn(async move {
        let state = match weather {
            Some((location, provider)) => fetch_weather(&location, &provider).await,
            None => WeatherState::Disabled,
        };
        if evt_tx
            .send(StartupEvent::WeatherResolved(state))
            .await
            .is_err()
        {
            tracing::debug!("ui gone before weather resolved");
        }
    });

    evt_rx
}
