//! Scalar comparison statistics.

use contracts::{AlignedSeries, ComparisonError, ComparisonStats, RawLap};
use tracing::instrument;

/// Reduce the aligned pair and both lap records into [`ComparisonStats`].
///
/// Lap time difference uses the recorded lap durations, not the interpolated
/// time channel.
///
/// # Errors
/// - `MissingLapTime` if either lap has no recorded duration
/// - `InsufficientData` if an aligned channel is empty
#[instrument(
    name = "stats_summarize",
    level = "debug",
    skip_all,
    fields(driver_a = %a.driver, driver_b = %b.driver)
)]
pub fn summarize(
    a: &AlignedSeries,
    b: &AlignedSeries,
    lap_a: &RawLap,
    lap_b: &RawLap,
) -> Result<ComparisonStats, ComparisonError> {
    let time_a = lap_time(lap_a)?;
    let time_b = lap_time(lap_b)?;

    Ok(ComparisonStats {
        top_speed_diff: max(a, &a.speed)? - max(b, &b.speed)?,
        avg_throttle_a: mean(a, &a.throttle)?,
        avg_throttle_b: mean(b, &b.throttle)?,
        lap_time_diff: time_a - time_b,
    })
}

fn lap_time(lap: &RawLap) -> Result<f64, ComparisonError> {
    lap.lap_time_secs()
        .ok_or_else(|| ComparisonError::MissingLapTime {
            driver: lap.driver.clone(),
            lap: lap.lap_number,
        })
}

fn max(series: &AlignedSeries, values: &[f64]) -> Result<f64, ComparisonError> {
    non_empty(series, values)?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

fn mean(series: &AlignedSeries, values: &[f64]) -> Result<f64, ComparisonError> {
    non_empty(series, values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

fn non_empty(series: &AlignedSeries, values: &[f64]) -> Result<(), ComparisonError> {
    if values.is_empty() {
        return Err(ComparisonError::insufficient_data(
            format!("driver '{}' lap {}", series.driver, series.lap_number),
            "aligned channel is empty",
        ));
    }
    Ok(())
}
