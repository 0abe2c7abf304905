//! # Contracts
//!
//! Shared data model and collaborator interfaces for two-driver lap comparison.
//! Every other crate in the workspace depends on this one; it depends on none of them.
//!
//! ## Distance Model
//! - Distance along lap is meters (f64), measured from the lap start line
//! - Elapsed time is a `Duration` since the lap start; aligned channels carry it as seconds
//! - Delta convention: `B.time - A.time`, positive means driver B is behind

mod aligned;
mod blueprint;
mod color;
mod driver_code;
mod error;
mod lap;
mod provider;
pub mod serde_secs;
mod telemetry;

pub use aligned::*;
pub use blueprint::*;
pub use color::Color;
pub use driver_code::DriverCode;
pub use error::*;
pub use lap::*;
pub use provider::{ColorResolver, SessionInfo, SessionProvider};
pub use telemetry::*;
