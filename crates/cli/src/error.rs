//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Session data file not found
    #[error("Session file not found: {path}")]
    SessionNotFound { path: String },

    /// Neither `--session` nor `[session] path` was given
    #[error("No session file given: use --session or set [session] path in the config")]
    MissingSession,

    /// A required driver code was not given
    #[error("No {which} given: use --{flag} or set it in the [comparison] config section")]
    MissingDriver {
        which: &'static str,
        flag: &'static str,
    },

    /// Malformed `--driver` spec for `synth`
    #[error("Invalid driver spec '{spec}': {message}")]
    InvalidDriverSpec { spec: String, message: String },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn session_not_found(path: impl Into<String>) -> Self {
        Self::SessionNotFound { path: path.into() }
    }

    pub fn invalid_driver_spec(spec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDriverSpec {
            spec: spec.into(),
            message: message.into(),
        }
    }
}
