//! # Comparator
//!
//! One two-driver lap comparison, driven through a fixed sequence of stages.
//!
//! Responsibilities:
//! - Lap selection (explicit lap number or each driver's fastest timed lap)
//! - Telemetry retrieval and distance integration
//! - Alignment, delta curve and statistics via `alignment`
//! - Serializable report of the finished comparison
//!
//! ## Usage Example
//!
//! ```ignore
//! use comparator::{Comparator, ComparisonRequest};
//!
//! let request = ComparisonRequest::new("LEC", "NOR", LapSelection::Fastest);
//! let mut comparator = Comparator::new(&session, &palette, request);
//!
//! let stats = comparator.process()?;
//! println!("lap time diff: {:+.3}s", stats.lap_time_diff);
//!
//! let report = comparator.report(false);
//! ```

mod comparator;
mod report;
mod selection;

pub use comparator::{Comparator, ComparatorState, Comparison, ComparisonRequest, Stage};
pub use report::{ChannelTraces, ComparisonReport, DriverReport, Traces};
pub use selection::select_lap;
