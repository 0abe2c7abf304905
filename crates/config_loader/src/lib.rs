//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Generate `ComparisonBlueprint`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("compare.toml")).unwrap();
//! println!("{} vs {}", blueprint.comparison.driver_a, blueprint.comparison.driver_b);
//! ```

mod parser;
mod validator;

pub use contracts::ComparisonBlueprint;
pub use parser::ConfigFormat;

use contracts::ComparisonError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<ComparisonBlueprint, ComparisonError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ComparisonBlueprint, ComparisonError> {
        let blueprint = parser::parse(content, format)?;
        Self::validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Validate an already-built blueprint (e.g. after command-line overrides)
    pub fn validate(blueprint: &ComparisonBlueprint) -> Result<(), ComparisonError> {
        validator::validate(blueprint)
    }

    /// Serialize ComparisonBlueprint to TOML string
    pub fn to_toml(blueprint: &ComparisonBlueprint) -> Result<String, ComparisonError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| ComparisonError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize ComparisonBlueprint to JSON string
    pub fn to_json(blueprint: &ComparisonBlueprint) -> Result<String, ComparisonError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| ComparisonError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ComparisonError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ComparisonError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ComparisonError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    fn read_file(path: &Path) -> Result<String, ComparisonError> {
        Ok(std::fs::read_to_string(path)?)
    }
}
