//! Resampling of two laps onto one shared distance grid.

use contracts::{
    AlignedSeries, Channel, Color, ColorResolver, ComparisonError, DistanceGrid, RawSeries,
    SessionProvider,
};
use tracing::{debug, instrument, warn};

use crate::grid::build_grid;
use crate::interp::Interpolator;

/// Minimum samples per lap for interpolation
const MIN_SAMPLES: usize = 2;

/// The two aligned series of one comparison.
///
/// Both series hold clones of the same [`DistanceGrid`] allocation.
#[derive(Debug, Clone)]
pub struct AlignedPair {
    pub a: AlignedSeries,
    pub b: AlignedSeries,
}

impl AlignedPair {
    pub fn grid(&self) -> &DistanceGrid {
        &self.a.grid
    }
}

/// Builds the common grid and interpolates every channel onto it.
#[derive(Debug, Clone)]
pub struct Resampler {
    /// Substituted when the styling lookup fails
    fallback_color: Color,
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new(Color::fallback())
    }
}

impl Resampler {
    pub fn new(fallback_color: Color) -> Self {
        Self { fallback_color }
    }

    /// Align `a` and `b` on a grid ending at the shorter lap distance.
    ///
    /// # Errors
    /// `InsufficientData` if either lap has fewer than two samples, has
    /// non-finite or decreasing distances, or if the shorter lap is under 1 m.
    #[instrument(
        name = "resampler_resample",
        skip_all,
        fields(driver_a = %a.driver, driver_b = %b.driver)
    )]
    pub fn resample(
        &self,
        a: &RawSeries,
        b: &RawSeries,
        colors: &dyn ColorResolver,
        session: &dyn SessionProvider,
    ) -> Result<AlignedPair, ComparisonError> {
        let max_a = validate_series(a)?;
        let max_b = validate_series(b)?;
        let grid = build_grid(max_a, max_b)?;

        debug!(
            max_a,
            max_b,
            points = grid.len(),
            "distance grid built"
        );

        let color_a = self.resolve_color(a, colors, session);
        let color_b = self.resolve_color(b, colors, session);

        Ok(AlignedPair {
            a: align(a, &grid, color_a)?,
            b: align(b, &grid, color_b)?,
        })
    }

    fn resolve_color(
        &self,
        series: &RawSeries,
        colors: &dyn ColorResolver,
        session: &dyn SessionProvider,
    ) -> Color {
        match colors.color_for(&series.driver, session) {
            Ok(color) => color,
            Err(e) => {
                warn!(
                    driver = %series.driver,
                    error = %e,
                    fallback = %self.fallback_color,
                    "color lookup failed, using fallback"
                );
                metrics::counter!(
                    "lapdelta_color_fallbacks_total",
                    "driver" => series.driver.to_string()
                )
                .increment(1);
                self.fallback_color.clone()
            }
        }
    }
}

/// Check interpolation preconditions and return the lap's max distance.
fn validate_series(series: &RawSeries) -> Result<f64, ComparisonError> {
    let scope = || format!("driver '{}' lap {}", series.driver, series.lap_number);

    if series.len() < MIN_SAMPLES {
        return Err(ComparisonError::insufficient_data(
            scope(),
            format!(
                "{} telemetry samples, need at least {MIN_SAMPLES}",
                series.len()
            ),
        ));
    }

    let distances = series.distances();
    if let Some(index) = distances.iter().position(|d| !d.is_finite()) {
        return Err(ComparisonError::insufficient_data(
            scope(),
            format!("non-finite distance at sample {index}"),
        ));
    }
    if let Some(index) = distances.windows(2).position(|w| w[1] < w[0]) {
        return Err(ComparisonError::insufficient_data(
            scope(),
            format!("distance decreases at sample {}", index + 1),
        ));
    }

    Ok(distances[distances.len() - 1])
}

fn align(
    series: &RawSeries,
    grid: &DistanceGrid,
    color: Color,
) -> Result<AlignedSeries, ComparisonError> {
    let distances = series.distances();
    let resample = |channel: Channel| -> Result<Vec<f64>, ComparisonError> {
        let values = series.channel(channel);
        let interp = Interpolator::new(&distances, &values).ok_or_else(|| {
            if distances.len() == values.len() {
                ComparisonError::insufficient_data(
                    format!("driver '{}' lap {}", series.driver, series.lap_number),
                    format!("no samples to interpolate for channel '{}'", channel.name()),
                )
            } else {
                ComparisonError::AlignmentMismatch {
                    expected: distances.len(),
                    actual: values.len(),
                }
            }
        })?;
        Ok(interp.sample(grid.as_slice()))
    };

    Ok(AlignedSeries {
        driver: series.driver.clone(),
        lap_number: series.lap_number,
        grid: grid.clone(),
        time: resample(Channel::Time)?,
        speed: resample(Channel::Speed)?,
        throttle: resample(Channel::Throttle)?,
        brake: resample(Channel::Brake)?,
        gear: resample(Channel::Gear)?,
        color,
    })
}
