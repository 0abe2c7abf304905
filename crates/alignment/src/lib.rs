//! # Alignment
//!
//! Distance-domain alignment of two laps.
//!
//! Responsibilities:
//! - Shared 1-meter distance grid over the shorter of the two laps
//! - Clamped piecewise-linear resampling of every telemetry channel
//! - Signed time-delta curve (`B.time - A.time`)
//! - Scalar comparison statistics
//!
//! ## Usage Example
//!
//! ```ignore
//! use alignment::{compute_delta, summarize, Resampler};
//!
//! let resampler = Resampler::new(Color::fallback());
//! let pair = resampler.resample(&series_a, &series_b, &palette, &session)?;
//! let delta = compute_delta(&pair.a, &pair.b)?;
//! let stats = summarize(&pair.a, &pair.b, &lap_a, &lap_b)?;
//! ```

mod delta;
mod grid;
mod interp;
mod resampler;
mod stats;

pub use delta::compute_delta;
pub use grid::{build_grid, linspace};
pub use interp::Interpolator;
pub use resampler::{AlignedPair, Resampler};
pub use stats::summarize;

// Re-export contracts types
pub use contracts::{AlignedSeries, ComparisonStats, DeltaSeries, DistanceGrid, RawSeries};
