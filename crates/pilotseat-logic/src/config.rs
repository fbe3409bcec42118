//! Flight configuration: the fixed parameters a [`Ship`](crate::ship::Ship) is built with.
//!
//! The host page may tune these (difficulty presets, debug builds) before
//! seating the pilot. Validation reports every problem at once so a settings
//! screen can show them all.
//!
//! ```
//! use pilotseat_logic::config::{validate_config, FlightConfig};
//!
//! let mut config = FlightConfig::default();
//! config.scanner_range = 2000.0;
//! assert!(validate_config(&config).is_empty());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, limits};

/// Ship flight parameters and starting gauge levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Speed cap in units per second.
    pub max_speed: f32,
    /// Linear acceleration at full thrust.
    pub acceleration: f32,
    /// Rotation rate in degrees per second at full deflection.
    pub angular_rate: f32,
    /// Energy regained per second.
    pub energy_regen_rate: f32,
    /// Scanner reach in scan distance units.
    pub scanner_range: f32,
    pub initial_fuel: f32,
    pub initial_hull_integrity: f32,
    pub initial_shield_power: f32,
    pub initial_energy: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            max_speed: defaults::MAX_SPEED,
            acceleration: defaults::ACCELERATION,
            angular_rate: defaults::ANGULAR_RATE,
            energy_regen_rate: defaults::ENERGY_REGEN_RATE,
            scanner_range: defaults::SCANNER_RANGE,
            initial_fuel: defaults::FUEL,
            initial_hull_integrity: defaults::HULL_INTEGRITY,
            initial_shield_power: defaults::SHIELD_POWER,
            initial_energy: defaults::ENERGY,
        }
    }
}

impl FlightConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Named parameter must be strictly positive.
    NonPositive(&'static str, f32),
    /// Named parameter must not be negative.
    Negative(&'static str, f32),
    /// Named parameter is NaN or infinite.
    NonFinite(&'static str),
    /// Starting gauge level outside 0-100.
    GaugeOutOfRange(&'static str, f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive(name, v) => write!(f, "{} must be > 0 (got {})", name, v),
            ConfigError::Negative(name, v) => write!(f, "{} must be >= 0 (got {})", name, v),
            ConfigError::NonFinite(name) => write!(f, "{} must be a finite number", name),
            ConfigError::GaugeOutOfRange(name, v) => write!(
                f,
                "{} must be within {}..={} (got {})",
                name,
                limits::GAUGE_MIN,
                limits::GAUGE_MAX,
                v
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a flight configuration, returning all errors found.
pub fn validate_config(config: &FlightConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let positive = [
        ("max_speed", config.max_speed),
        ("acceleration", config.acceleration),
        ("angular_rate", config.angular_rate),
    ];
    let non_negative = [
        ("energy_regen_rate", config.energy_regen_rate),
        ("scanner_range", config.scanner_range),
    ];
    let gauges = [
        ("initial_fuel", config.initial_fuel),
        ("initial_hull_integrity", config.initial_hull_integrity),
        ("initial_shield_power", config.initial_shield_power),
        ("initial_energy", config.initial_energy),
    ];

    for &(name, v) in positive.iter().chain(&non_negative).chain(&gauges) {
        if !v.is_finite() {
            errors.push(ConfigError::NonFinite(name));
        }
    }
    for (name, v) in positive {
        if v <= 0.0 {
            errors.push(ConfigError::NonPositive(name, v));
        }
    }
    for (name, v) in non_negative {
        if v < 0.0 {
            errors.push(ConfigError::Negative(name, v));
        }
    }
    for (name, v) in gauges {
        if !(limits::GAUGE_MIN..=limits::GAUGE_MAX).contains(&v) && v.is_finite() {
            errors.push(ConfigError::GaugeOutOfRange(name, v));
        }
    }

    errors
}
