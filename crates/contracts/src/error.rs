//! Layered error definitions
//!
//! Categorized by source: comparison pipeline / data provider / styling / config

use thiserror::Error;

use crate::{DriverCode, LapNumber, LapSelection};

/// Comparison error.
///
/// Every variant is terminal for the current request.
#[derive(Debug, Error)]
pub enum ComparisonError {
    // ===== Lap Selection Errors =====
    /// Driver has no laps in the session
    #[error("driver '{driver}' not found in this session")]
    DriverNotFound { driver: DriverCode },

    /// Requested lap missing for a driver
    #[error("{selection} not available for driver '{driver}'")]
    LapNotFound {
        driver: DriverCode,
        selection: LapSelection,
    },

    // ===== Provider Errors =====
    /// Telemetry retrieval failed
    #[error("could not retrieve telemetry for driver '{driver}' lap {lap}: {source}")]
    TelemetryUnavailable {
        driver: DriverCode,
        lap: LapNumber,
        #[source]
        source: ProviderError,
    },

    // ===== Alignment Errors =====
    /// Not enough samples or distance to build a grid
    #[error("insufficient data for {scope}: {message}")]
    InsufficientData { scope: String, message: String },

    /// Aligned series do not share a grid length
    #[error("alignment mismatch: grid has {expected} points, series has {actual}")]
    AlignmentMismatch { expected: usize, actual: usize },

    // ===== Statistics Errors =====
    /// Lap has no recorded duration
    #[error("lap {lap} of driver '{driver}' has no recorded lap time")]
    MissingLapTime { driver: DriverCode, lap: LapNumber },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComparisonError {
    pub fn driver_not_found(driver: &DriverCode) -> Self {
        Self::DriverNotFound {
            driver: driver.clone(),
        }
    }

    pub fn lap_not_found(driver: &DriverCode, selection: LapSelection) -> Self {
        Self::LapNotFound {
            driver: driver.clone(),
            selection,
        }
    }

    pub fn insufficient_data(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InsufficientData {
            scope: scope.into(),
            message: message.into(),
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Data provider error (wrapped by `ComparisonError::TelemetryUnavailable`).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No car data stored for the lap
    #[error("no car data recorded for driver '{driver}' lap {lap}")]
    NoCarData { driver: DriverCode, lap: LapNumber },

    /// Car data present but unusable
    #[error("invalid car data: {message}")]
    InvalidCarData { message: String },

    /// Other provider failure
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn invalid_car_data(message: impl Into<String>) -> Self {
        Self::InvalidCarData {
            message: message.into(),
        }
    }
}

/// Styling lookup error. Never aborts a comparison.
#[derive(Debug, Error)]
pub enum StylingError {
    #[error("no color known for driver '{driver}'")]
    UnknownDriver { driver: DriverCode },

    #[error("no color known for team '{team}'")]
    UnknownTeam { team: String },
}
