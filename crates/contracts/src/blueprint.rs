//! ComparisonBlueprint - Config Loader output
//!
//! Describes one comparison request: which session file, which drivers and
//! laps, styling tables and observability options.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use validator::Validate;

use crate::{Color, DriverCode, LapNumber, LapSelection};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete comparison configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ComparisonBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Where the session data comes from
    #[serde(default)]
    pub session: SessionSource,

    /// Drivers and lap to compare
    #[validate(nested)]
    pub comparison: ComparisonConfig,

    /// Color tables
    #[serde(default)]
    #[validate(nested)]
    pub styling: StylingConfig,

    /// Metrics export
    #[serde(default)]
    pub observability: ObservabilityOptions,
}

/// Session data location (consumed by the CLI, never by the core)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSource {
    /// Path to a session JSON file
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// The two drivers and the lap to compare
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ComparisonConfig {
    /// Driver A (reference driver)
    #[validate(length(min = 1, max = 8))]
    pub driver_a: String,

    /// Driver B
    #[validate(length(min = 1, max = 8))]
    pub driver_b: String,

    /// Lap number for both drivers; omitted means each driver's fastest lap
    #[serde(default)]
    #[validate(range(min = 1))]
    pub lap: Option<u32>,
}

impl ComparisonConfig {
    pub fn driver_a(&self) -> DriverCode {
        DriverCode::from(self.driver_a.as_str())
    }

    pub fn driver_b(&self) -> DriverCode {
        DriverCode::from(self.driver_b.as_str())
    }

    /// Lap selection strategy. Lap 0 is rejected by validation.
    pub fn selection(&self) -> LapSelection {
        LapSelection::from(self.lap.and_then(LapNumber::new))
    }
}

/// Styling tables for the palette collaborator
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StylingConfig {
    /// Color substituted when a lookup fails
    #[serde(default = "default_fallback_color")]
    #[validate(length(min = 1))]
    pub fallback_color: String,

    /// Team name -> color
    #[serde(default)]
    pub teams: HashMap<String, String>,

    /// Driver code -> color (overrides team colors)
    #[serde(default)]
    pub drivers: HashMap<String, String>,
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            fallback_color: default_fallback_color(),
            teams: HashMap::new(),
            drivers: HashMap::new(),
        }
    }
}

impl StylingConfig {
    pub fn fallback(&self) -> Color {
        Color::new(self.fallback_color.clone())
    }
}

fn default_fallback_color() -> String {
    Color::FALLBACK.to_string()
}

/// Metrics export options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservabilityOptions {
    /// Prometheus listener port (None = disabled)
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(lap: Option<u32>) -> ComparisonConfig {
        ComparisonConfig {
            driver_a: "VER".to_string(),
            driver_b: "HAM".to_string(),
            lap,
        }
    }

    #[test]
    fn test_selection_mapping() {
        assert_eq!(config(None).selection(), LapSelection::Fastest);
        assert_eq!(
            config(Some(12)).selection(),
            LapSelection::ByLapNumber(LapNumber::new(12).unwrap())
        );
    }

    #[test]
    fn test_derive_validation_rejects_lap_zero() {
        assert!(config(Some(0)).validate().is_err());
        assert!(config(Some(1)).validate().is_ok());
    }

    #[test]
    fn test_derive_validation_rejects_empty_driver() {
        let mut cfg = config(None);
        cfg.driver_b = String::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_styling_defaults() {
        let styling = StylingConfig::default();
        assert_eq!(styling.fallback(), Color::fallback());
        assert!(styling.teams.is_empty());
    }
}
