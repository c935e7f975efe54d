//! `termtodo` — terminal to-do list with a local weather card.
//!
//! Tasks are stored on disk and reloaded on the next launch. The weather
//! card needs an OpenWeatherMap API key and a position. Configuration via
//! CLI flags, environment variables, or config file
//! (`~/.config/termtodo/config.toml`).
//!
//! ```bash
//! # Tasks only
//! cargo run --bin termtodo -- --no-weather
//!
//! # With weather
//! OPENWEATHER_API_KEY=... cargo run --bin termtodo -- --lat 40.42 --lon -3.70
//!
//! # Throwaway session
//! cargo run --bin termtodo -- --ephemeral
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use termtodo::app::App;
use termtodo::config::{CliArgs, ClientConfig};
use termtodo::startup::{self, StartupEvent, WeatherSources};
use termtodo::storage::{FileStore, InMemoryStore, KeyValueStore, SaveQueue};
use termtodo::tasks::TaskStore;
use termtodo::ui;
use termtodo::weather::openweather::temperature_suffix;
use termtodo::weather::{ConfiguredLocation, OpenWeatherClient, WeatherState};

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // CLI args > env > config file > defaults.
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config: {e}");
            ClientConfig::default()
        }
    };

    // Logs go to a file, never stdout.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(
        ephemeral = config.ephemeral,
        data_dir = %config.data_dir.display(),
        "termtodo starting"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = if config.ephemeral {
        run_app(&mut terminal, Arc::new(InMemoryStore::new()), &config).await
    } else {
        let store = FileStore::new(config.data_dir.clone());
        run_app(&mut terminal, Arc::new(store), &config).await
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("termtodo exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("termtodo.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Weather collaborators from the resolved config, or `None` when the
/// card is turned off.
fn weather_sources(config: &ClientConfig) -> WeatherSources<ConfiguredLocation, OpenWeatherClient> {
    let weather_config = match config.to_weather_config() {
        Ok(Some(c)) => c,
        Ok(None) => {
            tracing::info!("weather disabled or no API key configured");
            return None;
        }
        Err(e) => {
            tracing::error!(error = %e, "invalid weather settings");
            return None;
        }
    };
    match OpenWeatherClient::new(weather_config) {
        Ok(client) => Some((config.location(), client)),
        Err(e) => {
            tracing::error!(error = %e, "could not build weather client");
            None
        }
    }
}

/// Main application loop.
async fn run_app<S>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: Arc<S>,
    config: &ClientConfig,
) -> io::Result<()>
where
    S: KeyValueStore + 'static,
{
    let weather = weather_sources(config);
    let initial_weather = if weather.is_some() {
        WeatherState::Loading
    } else {
        WeatherState::Disabled
    };

    let mut app = App::new(TaskStore::new(config.timestamp_format.clone()))
        .with_weather(initial_weather)
        .with_temperature_suffix(temperature_suffix(&config.units));

    let saves = SaveQueue::spawn(Arc::clone(&store), config.storage_key.clone());
    let mut startup_rx = startup::spawn_startup(store, config.storage_key.clone(), weather);

    let result = event_loop(terminal, &mut app, &mut startup_rx, &saves, config).await;

    // Write out whatever the user did last, even after a draw error.
    saves.shutdown().await;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    startup_rx: &mut mpsc::Receiver<StartupEvent>,
    saves: &SaveQueue,
    config: &ClientConfig,
) -> io::Result<()> {
    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Step 2: Apply finished startup work (non-blocking).
        drain_startup_events(app, startup_rx, saves);

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // Some(snapshot) means the task list changed and must be saved.
            if let Some(snapshot) = app.handle_key_event(key) {
                saves.submit(snapshot);
            }
        }

        if app.should_quit {
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}

/// Drain all pending `StartupEvent`s from the receiver and apply them to the app.
fn drain_startup_events(
    app: &mut App,
    rx: &mut mpsc::Receiver<StartupEvent>,
    saves: &SaveQueue,
) {
    while let Ok(event) = rx.try_recv() {
        if let Some(snapshot) = app.apply_startup_event(event) {
            saves.submit(snapshot);
        }
    }
}
