//! # Session
//!
//! In-memory implementations of the comparison collaborators.
//!
//! Responsibilities:
//! - `InMemorySession`: a `SessionProvider` backed by a session JSON document
//! - `TeamPalette`: a `ColorResolver` driven by team/driver color tables
//! - `SyntheticLap`: deterministic car data generator for tests and demos
//!
//! ## Usage Example
//!
//! ```ignore
//! use session::{InMemorySession, TeamPalette};
//!
//! let session = InMemorySession::load_from_path(Path::new("monza_q.json"))?;
//! let palette = TeamPalette::from_config(&blueprint.styling);
//! let laps = session.laps(&"VER".into());
//! ```

mod error;
mod memory;
mod palette;
mod synthetic;

// Re-exports
pub use error::{Result, SessionError};
pub use memory::{DriverRecord, InMemorySession, LapRecord, SessionDocument};
pub use palette::TeamPalette;
pub use synthetic::{SyntheticLap, TrackProfile};
