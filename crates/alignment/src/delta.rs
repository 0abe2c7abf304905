//! Time-delta curve between two aligned laps.

use contracts::{AlignedSeries, ComparisonError, DeltaSeries};
use tracing::instrument;

/// `delta[i] = b.time[i] - a.time[i]` in seconds.
///
/// Positive values mean driver B reached that distance later (A ahead).
///
/// # Errors
/// `AlignmentMismatch` if the two series do not have identical grid lengths,
/// or a time channel does not match its grid.
#[instrument(
    name = "delta_compute",
    level = "debug",
    skip_all,
    fields(driver_a = %a.driver, driver_b = %b.driver)
)]
pub fn compute_delta(a: &AlignedSeries, b: &AlignedSeries) -> Result<DeltaSeries, ComparisonError> {
    let expected = a.grid.len();

    for actual in [b.grid.len(), a.time.len(), b.time.len()] {
        if actual != expected {
            return Err(ComparisonError::AlignmentMismatch { expected, actual });
        }
    }

    let values = b
        .time
        .iter()
        .zip(&a.time)
        .map(|(tb, ta)| tb - ta)
        .collect();

    Ok(DeltaSeries::new(a.grid.clone(), values))
}
