//! Routing settings for graph construction.

use serde::{Deserialize, Serialize};

const METERS_PER_KM: f64 = 1000.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Error returned when routing settings are out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    /// Wait time is negative or not finite
    #[error("bus wait time must be a non-negative number of minutes, got {0}")]
    InvalidWaitTime(f64),

    /// Velocity is zero, negative or not finite
    #[error("bus velocity must be a positive number of km/h, got {0}")]
    InvalidVelocity(f64),
}

/// Settings that turn distances and stops into travel times.
///
/// Immutable once handed to the builder. Deserializes from the
/// `routing_settings` object of a catalogue file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Time spent waiting for a bus at any stop (minutes).
    pub bus_wait_time: f64,

    /// Bus travel speed (km/h).
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Create settings with the given wait time (minutes) and velocity (km/h).
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
        }
    }

    /// Checks both values are in range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.bus_wait_time.is_finite() || self.bus_wait_time < 0.0 {
            return Err(SettingsError::InvalidWaitTime(self.bus_wait_time));
        }
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(SettingsError::InvalidVelocity(self.bus_velocity));
        }
        Ok(())
    }

    /// Returns the wait time in minutes.
    pub fn wait_time(&self) -> f64 {
        self.bus_wait_time
    }

    /// Returns the velocity converted to meters per minute.
    pub fn velocity_meters_per_minute(&self) -> f64 {
        self.bus_velocity * METERS_PER_KM / MINUTES_PER_HOUR
    }

    /// Minutes needed to ride `meters` at the configured velocity.
    pub fn ride_time(&self, meters: u64) -> f64 {
        meters as f64 / self.velocity_meters_per_minute()
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = RoutingSettings::default();

        assert_eq!(settings.bus_wait_time, 6.0);
        assert_eq!(settings.bus_velocity, 40.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn unit_conversion() {
        let settings = RoutingSettings::new(2.0, 60.0);

        assert_eq!(settings.wait_time(), 2.0);
        assert_eq!(settings.velocity_meters_per_minute(), 1000.0);
        assert_eq!(settings.ride_time(2500), 2.5);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            RoutingSettings::new(-1.0, 40.0).validate(),
            Err(SettingsError::InvalidWaitTime(-1.0))
        );
        assert_eq!(
            RoutingSettings::new(6.0, 0.0).validate(),
            Err(SettingsError::InvalidVelocity(0.0))
        );
        assert!(RoutingSettings::new(f64::NAN, 40.0).validate().is_err());
        assert!(RoutingSettings::new(6.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn zero_wait_is_allowed() {
        assert!(RoutingSettings::new(0.0, 30.0).validate().is_ok());
    }

    #[test]
    fn deserialize_from_json() {
        let settings: RoutingSettings =
            serde_json::from_str(r#"{"bus_wait_time": 2, "bus_velocity": 30}"#).unwrap();
        assert_eq!(settings, RoutingSettings::new(2.0, 30.0));

        // Missing fields fall back to defaults
        let settings: RoutingSettings = serde_json::from_str(r#"{"bus_wait_time": 3}"#).unwrap();
        assert_eq!(settings, RoutingSettings::new(3.0, 40.0));
    }

    #[test]
    fn error_display() {
        let err = SettingsError::InvalidVelocity(-5.0);
        assert_eq!(
            err.to_string(),
            "bus velocity must be a positive number of km/h, got -5"
        );
    }
}
