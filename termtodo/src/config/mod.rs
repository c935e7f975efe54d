//! Configuration system for the `termtodo` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/termtodo/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use url::Url;

use termtodo_core::weather::Coordinates;

use crate::storage::TASKS_STORAGE_KEY;
use crate::tasks::DEFAULT_TIMESTAMP_FORMAT;
use crate::weather::openweather::{
    DEFAULT_ENDPOINT, DEFAULT_LANG, DEFAULT_TIMEOUT, DEFAULT_UNITS, OpenWeatherConfig,
};
use crate::weather::ConfiguredLocation;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The weather endpoint is not a valid absolute URL.
    #[error("invalid weather endpoint {url:?}: {source}")]
    InvalidEndpoint {
        /// The rejected value.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },

    /// The completion timestamp format has an unknown specifier.
    #[error("invalid timestamp format {0:?}")]
    InvalidTimestampFormat(String),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    weather: WeatherFileConfig,
    location: LocationFileConfig,
    ui: UiFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
    key: Option<String>,
}

/// `[weather]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct WeatherFileConfig {
    enabled: Option<bool>,
    api_key: Option<String>,
    endpoint: Option<String>,
    units: Option<String>,
    lang: Option<String>,
    timeout_secs: Option<u64>,
}

/// `[location]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct LocationFileConfig {
    enabled: Option<bool>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    timestamp_format: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    // -- Storage --
    /// Directory holding the stored task list.
    pub data_dir: PathBuf,
    /// Keep tasks in memory only.
    pub ephemeral: bool,
    /// Storage key of the task list.
    pub storage_key: String,

    // -- Weather --
    /// Whether the weather card looks up anything at all.
    pub weather_enabled: bool,
    /// OpenWeatherMap API key. Weather is disabled without one.
    pub api_key: Option<String>,
    /// Current-weather endpoint URL.
    pub weather_endpoint: String,
    /// Unit system requested from the weather service.
    pub units: String,
    /// Language of the weather description.
    pub lang: String,
    /// Weather request timeout.
    pub weather_timeout: Duration,

    // -- Location --
    /// Whether the configured position may be used.
    pub location_enabled: bool,
    /// Latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    pub longitude: Option<f64>,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Completion timestamp format string (chrono).
    pub timestamp_format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            ephemeral: false,
            storage_key: TASKS_STORAGE_KEY.to_string(),
            weather_enabled: true,
            api_key: None,
            weather_endpoint: DEFAULT_ENDPOINT.to_string(),
            units: DEFAULT_UNITS.to_string(),
            lang: DEFAULT_LANG.to_string(),
            weather_timeout: DEFAULT_TIMEOUT,
            location_enabled: true,
            latitude: None,
            longitude: None,
            poll_timeout: Duration::from_millis(50),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an
    /// error. If no `--config` is given, the default path
    /// (`~/.config/termtodo/config.toml`) is tried and silently ignored if
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed,
    /// or if the resolved endpoint or timestamp format is invalid.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        let config = Self::resolve(cli, &file);
        config.validate()?;
        Ok(config)
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            data_dir: cli
                .data_dir
                .clone()
                .or_else(|| file.storage.data_dir.clone())
                .unwrap_or(defaults.data_dir),
            ephemeral: cli.ephemeral,
            storage_key: file
                .storage
                .key
                .clone()
                .unwrap_or(defaults.storage_key),
            weather_enabled: !cli.no_weather
                && file.weather.enabled.unwrap_or(defaults.weather_enabled),
            api_key: cli
                .api_key
                .clone()
                .or_else(|| file.weather.api_key.clone())
                .filter(|k| !k.trim().is_empty()),
            weather_endpoint: file
                .weather
                .endpoint
                .clone()
                .unwrap_or(defaults.weather_endpoint),
            units: file.weather.units.clone().unwrap_or(defaults.units),
            lang: cli
                .lang
                .clone()
                .or_else(|| file.weather.lang.clone())
                .unwrap_or(defaults.lang),
            weather_timeout: file
                .weather
                .timeout_secs
                .map_or(defaults.weather_timeout, Duration::from_secs),
            location_enabled: file
                .location
                .enabled
                .unwrap_or(defaults.location_enabled),
            latitude: cli.lat.or(file.location.latitude),
            longitude: cli.lon.or(file.location.longitude),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            timestamp_format: cli
                .timestamp_format
                .clone()
                .or_else(|| file.ui.timestamp_format.clone())
                .unwrap_or(defaults.timestamp_format),
        }
    }

    /// Check values that are only known to be wrong once resolved.
    fn validate(&self) -> Result<(), ConfigError> {
        parse_endpoint(&self.weather_endpoint)?;
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidTimestampFormat(
                self.timestamp_format.clone(),
            ));
        }
        Ok(())
    }

    /// Configured position, if both coordinates are set.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }

    /// Location provider for the weather lookup.
    #[must_use]
    pub fn location(&self) -> ConfiguredLocation {
        ConfiguredLocation::new(self.location_enabled, self.coordinates())
    }

    /// Build the weather client settings, if weather is enabled and an API
    /// key is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the endpoint does not parse.
    pub fn to_weather_config(&self) -> Result<Option<OpenWeatherConfig>, ConfigError> {
        if !self.weather_enabled {
            return Ok(None);
        }
        let Some(api_key) = self.api_key.clone() else {
            return Ok(None);
        };
        Ok(Some(OpenWeatherConfig {
            endpoint: parse_endpoint(&self.weather_endpoint)?,
            api_key,
            units: self.units.clone(),
            lang: self.lang.clone(),
            timeout: self.weather_timeout,
        }))
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal to-do list with a local weather card")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/termtodo/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the stored task list.
    #[arg(long, env = "TERMTODO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep tasks in memory only; nothing is written to disk.
    #[arg(long)]
    pub ephemeral: bool,

    /// Do not look up the weather.
    #[arg(long)]
    pub no_weather: bool,

    /// OpenWeatherMap API key.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Latitude for the weather lookup.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude for the weather lookup.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Language of the weather description (e.g. `en`, `es`).
    #[arg(long)]
    pub lang: Option<String>,

    /// Completion timestamp format (chrono format string).
    #[arg(long)]
    pub timestamp_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TERMTODO_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/termtodo.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("termtodo")
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint {
        url: raw.to_string(),
        source,
    })
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("termtodo").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
