//! OpenWeatherMap "current weather" HTTP adapter.

use std::time::Duration;

use url::Url;

use termtodo_core::weather::{Coordinates, WeatherSnapshot, parse_openweather};

use super::{WeatherError, WeatherProvider};

/// Public current-weather endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Unit system requested by default (Celsius).
pub const DEFAULT_UNITS: &str = "metric";

/// Description language requested by default.
pub const DEFAULT_LANG: &str = "en";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Display suffix for temperatures in the given `units` system.
#[must_use]
pub fn temperature_suffix(units: &str) -> &'static str {
    match units {
        "imperial" => "\u{b0}F",
        "standard" => " K",
        _ => "\u{b0}C",
    }
}

/// Resolved settings for [`OpenWeatherClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWeatherConfig {
    /// Current-weather endpoint.
    pub endpoint: Url,
    /// API key sent as `appid`.
    pub api_key: String,
    /// `units` query value.
    pub units: String,
    /// `lang` query value.
    pub lang: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl OpenWeatherConfig {
    /// Settings for the public endpoint with default units, language and timeout.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in endpoint; the `Result` covers URL parsing.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
            api_key: api_key.into(),
            units: DEFAULT_UNITS.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }
}

/// [`WeatherProvider`] backed by the OpenWeatherMap HTTP API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Network`] if the HTTP client cannot be
    /// initialised (e.g. no TLS backend).
    pub fn new(config: OpenWeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WeatherError::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Full request URL for `coords`.
    #[must_use]
    pub fn request_url(&self, coords: Coordinates) -> Url {
        let mut url = self.config.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("lat", &coords.latitude.to_string())
            .append_pair("lon", &coords.longitude.to_string())
            .append_pair("appid", &self.config.api_key)
            .append_pair("units", &self.config.units)
            .append_pair("lang", &self.config.lang);
        url
    }
}

impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        // The URL carries the API key; log the position only.
        tracing::debug!(
            lat = coords.latitude,
            lon = coords.longitude,
            "requesting current weather"
        );
        let response = self
            .http
            .get(self.request_url(coords))
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.without_url().to_string()))?;
        Ok(parse_openweather(&body)?)
    }
}
