//! Current-weather lookup for the weather card.
//!
//! The lookup runs once per launch and is never retried:
//!
//! 1. Ask the [`LocationProvider`] for permission; a denial ends the lookup.
//! 2. Read the current position.
//! 3. Ask the [`WeatherProvider`] for current conditions at that position.
//!
//! Every outcome is folded into a [`WeatherState`] for display; errors are
//! turned into a short user-facing message and never propagate further.

pub mod location;
pub mod openweather;

pub use location::ConfiguredLocation;
pub use openweather::{OpenWeatherClient, OpenWeatherConfig};

use termtodo_core::weather::{Coordinates, WeatherDecodeError, WeatherSnapshot};

/// Shown when location access is refused.
pub const PERMISSION_DENIED_MESSAGE: &str = "Location permission was denied";

/// Shown when the weather service answers with an error status.
pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch the weather.";

/// Shown when the position or the network request fails.
pub const LOOKUP_FAILED_MESSAGE: &str = "Error while getting the location or the weather.";

/// Errors from the location and weather providers.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The current position could not be determined.
    #[error("location unavailable: {0}")]
    Location(String),

    /// The weather service returned a non-success status.
    #[error("weather service returned HTTP {status}")]
    Api {
        /// HTTP status code.
        status: u16,
    },

    /// The request failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be understood.
    #[error("bad weather response: {0}")]
    Decode(#[from] WeatherDecodeError),
}

/// Outcome of asking for location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Location may be read.
    Granted,
    /// Location access was refused.
    Denied,
}

/// What the weather card shows.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherState {
    /// The lookup has not resolved yet.
    Loading,
    /// Current conditions are available.
    Ready(WeatherSnapshot),
    /// The lookup failed; carries the message to display.
    Unavailable(String),
    /// Weather display is turned off.
    Disabled,
}

impl WeatherState {
    /// Returns `true` while the lookup is still running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Source of the user's position.
pub trait LocationProvider: Send + Sync {
    /// Ask for permission to read the position.
    fn request_permission(&self) -> impl std::future::Future<Output = Permission> + Send;

    /// Read the current position.
    fn current_position(
        &self,
    ) -> impl std::future::Future<Output = Result<Coordinates, WeatherError>> + Send;
}

/// Source of current weather conditions.
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions at `coords`.
    fn current(
        &self,
        coords: Coordinates,
    ) -> impl std::future::Future<Output = Result<WeatherSnapshot, WeatherError>> + Send;
}

/// Run the one-shot weather lookup and fold the result into a display state.
pub async fn fetch_weather<L, W>(location: &L, weather: &W) -> WeatherState
where
    L: LocationProvider,
    W: WeatherProvider,
{
    if location.request_permission().await == Permission::Denied {
        tracing::info!("location permission denied, skipping weather");
        return WeatherState::Unavailable(PERMISSION_DENIED_MESSAGE.to_string());
    }

    let coords = match location.current_position().await {
        Ok(coords) => coords,
        Err(err) => {
            tracing::warn!(error = %err, "could not read position");
            return WeatherState::Unavailable(LOOKUP_FAILED_MESSAGE.to_string());
        }
    };

    match weather.current(coords).await {
        Ok(snapshot) => {
            tracing::info!(city = %snapshot.city, "weather loaded");
            WeatherState::Ready(snapshot)
        }
        Err(err @ WeatherError::Api { .. }) => {
            tracing::warn!(error = %err, "weather service rejected the request");
            WeatherState::Unavailable(FETCH_FAILED_MESSAGE.to_string())
        }
        Err(err) => {
            tracing::warn!(error = %err, "weather lookup failed");
            WeatherState::Unavailable(LOOKUP_FAILED_MESSAGE.to_string())
        }
    }
}
