//! Location provider backed by configured coordinates.

use termtodo_core::weather::Coordinates;

use super::{LocationProvider, Permission, WeatherError};

/// Position taken from configuration.
///
/// A terminal has no device location service; the user's opt-in is the
/// `[location] enabled` setting plus a latitude/longitude pair. Permission
/// is granted only when both are present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfiguredLocation {
    enabled: bool,
    coordinates: Option<Coordinates>,
}

impl ConfiguredLocation {
    /// Create a provider from the resolved settings.
    #[must_use]
    pub const fn new(enabled: bool, coordinates: Option<Coordinates>) -> Self {
        Self {
            enabled,
            coordinates,
        }
    }
}

impl LocationProvider for ConfiguredLocation {
    async fn request_permission(&self) -> Permission {
        if self.enabled && self.coordinates.is_some() {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    async fn current_position(&self) -> Result<Coordinates, WeatherError> {
        let coords = self
            .coordinates
            .ok_or_else(|| WeatherError::Location("no coordinates configured".to_string()))?;
        if !(-90.0..=90.0).contains(&coords.latitude) {
            return Err(WeatherError::Location(format!(
                "latitude {} out of range",
                coords.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&coords.longitude) {
            return Err(WeatherError::Location(format!(
                "longitude {} out of range",
                coords.longitude
            )));
        }
        Ok(coords)
    }
}
