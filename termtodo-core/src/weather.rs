//! Weather data model.
//!
//! [`WeatherSnapshot`] is the transient current-conditions value shown in the
//! weather card. [`OpenWeatherResponse`] mirrors the subset of the
//! OpenWeatherMap "current weather" response that the app consumes.

use serde::{Deserialize, Serialize};

/// Base URL for OpenWeatherMap condition icons.
pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Current conditions for a location. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// City name reported by the weather service.
    pub city: String,
    /// Textual description of the conditions (e.g. "light rain").
    pub description: String,
    /// OpenWeatherMap icon identifier (e.g. `"10d"`).
    pub icon: String,
    /// Temperature in the requested unit system (Celsius by default).
    pub temperature: f64,
}

impl WeatherSnapshot {
    /// Temperature rounded to the nearest integer, halves rounding up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    pub fn rounded_temperature(&self) -> i64 {
        // `f64::round` sends halves away from zero; move negative halves up.
        let t = self.temperature;
        let rounded = t.round();
        let rounded = if t - rounded == 0.5 { rounded + 1.0 } else { rounded };
        // Surface temperatures are far inside the i64 range.
        rounded as i64
    }

    /// URL of the 2x condition icon image.
    #[must_use]
    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}@2x.png", self.icon)
    }

    /// Terminal glyph for the condition icon.
    #[must_use]
    pub fn icon_glyph(&self) -> &'static str {
        let night = self.icon.ends_with('n');
        match self.icon.get(..2).unwrap_or_default() {
            "01" if night => "\u{1f319}",
            "01" => "\u{2600}",
            "02" => "\u{26c5}",
            "03" | "04" => "\u{2601}",
            "09" => "\u{1f327}",
            "10" => "\u{1f326}",
            "11" => "\u{26c8}",
            "13" => "\u{2744}",
            "50" => "\u{1f32b}",
            _ => "?",
        }
    }
}

/// Errors converting a weather service response into a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum WeatherDecodeError {
    /// The body is not the expected JSON shape.
    #[error("weather json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The response carried no condition entry.
    #[error("weather response has no conditions")]
    MissingCondition,
}

/// The consumed subset of an OpenWeatherMap current-weather response.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherResponse {
    /// City name.
    pub name: String,
    /// Condition entries; the first one is displayed.
    pub weather: Vec<OpenWeatherCondition>,
    /// Main measurements.
    pub main: OpenWeatherMain,
}

/// One `weather[]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherCondition {
    /// Localized description.
    pub description: String,
    /// Icon identifier.
    pub icon: String,
}

/// The `main` object.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherMain {
    /// Temperature in the requested unit system.
    pub temp: f64,
}

impl TryFrom<OpenWeatherResponse> for WeatherSnapshot {
    type Error = WeatherDecodeError;

    fn try_from(response: OpenWeatherResponse) -> Result<Self, Self::Error> {
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherDecodeError::MissingCondition)?;
        Ok(Self {
            city: response.name,
            description: condition.description,
            icon: condition.icon,
            temperature: response.main.temp,
        })
    }
}

/// Parses an OpenWeatherMap response body into a snapshot.
///
/// # Errors
///
/// Returns [`WeatherDecodeError`] if the body is malformed or has no
/// condition entry.
pub fn parse_openweather(body: &str) -> Result<WeatherSnapshot, WeatherDecodeError> {
    let response: OpenWeatherResponse = serde_json::from_str(body)?;
    WeatherSnapshot::try_from(response)
}
