//! Session loading errors

use thiserror::Error;

/// Session document error
#[derive(Debug, Error)]
pub enum SessionError {
    /// Session file could not be read
    #[error("failed to read session file: {0}")]
    Io(#[from] std::io::Error),

    /// Session document is not valid JSON for the expected schema
    #[error("failed to parse session document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Driver listed more than once
    #[error("duplicate driver '{driver}' in session")]
    DuplicateDriver {
        /// Driver code
        driver: String,
    },

    /// Lap listed more than once for one driver
    #[error("duplicate lap {lap} for driver '{driver}'")]
    DuplicateLap {
        /// Driver code
        driver: String,
        /// Lap number
        lap: u32,
    },
}

/// Session Result type alias
pub type Result<T> = std::result::Result<T, SessionError>;
