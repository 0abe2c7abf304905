//! Comparison metrics
//!
//! Records Prometheus metrics for finished comparisons and summarizes delta curves.

use contracts::{ComparisonStats, DeltaSeries, Leader};
use metrics::{counter, gauge, histogram};
use serde::Serialize;

/// Record metrics for a successful comparison.
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_comparison_metrics;
///
/// let stats = comparator.process()?;
/// if let Some(delta) = comparator.delta() {
///     record_comparison_metrics(&stats, delta);
/// }
/// ```
pub fn record_comparison_metrics(stats: &ComparisonStats, delta: &DeltaSeries) {
    counter!("lapdelta_comparisons_total", "status" => "success").increment(1);

    gauge!("lapdelta_grid_points").set(delta.len() as f64);

    if let Some(gap) = delta.final_gap() {
        gauge!("lapdelta_final_gap_seconds").set(gap);
        histogram!("lapdelta_final_gap_seconds_hist").record(gap.abs());
    }

    gauge!("lapdelta_top_speed_diff_kph").set(stats.top_speed_diff);
    gauge!("lapdelta_lap_time_diff_seconds").set(stats.lap_time_diff);
}

/// Record a failed comparison, labelled by the stage that failed.
pub fn record_comparison_failure(stage: &str) {
    counter!("lapdelta_comparisons_total", "status" => "failure").increment(1);
    counter!(
        "lapdelta_comparison_failures_total",
        "stage" => stage.to_string()
    )
    .increment(1);
}

/// Summary of a delta curve
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeltaSummary {
    /// Delta statistics over all grid points (s)
    pub delta: StatsSummary,

    /// Delta at the last grid point (s)
    pub final_gap: Option<f64>,

    /// Distance where driver A had the largest advantage (m)
    pub max_gain_a_at: Option<f64>,

    /// Distance where driver B had the largest advantage (m)
    pub max_gain_b_at: Option<f64>,

    /// Share of grid points where driver A is ahead (0..=1)
    pub a_ahead_ratio: f64,
}

impl DeltaSummary {
    pub fn from_delta(delta: &DeltaSeries) -> Self {
        let mut stats = RunningStats::default();
        let mut a_ahead = 0usize;
        let mut best_a: Option<(f64, f64)> = None;
        let mut best_b: Option<(f64, f64)> = None;

        for (distance, value) in delta.iter() {
            if !value.is_finite() {
                continue;
            }
            stats.push(value);

            if value > 0.0 {
                a_ahead += 1;
            }
            if best_a.map_or(true, |(_, best)| value > best) {
                best_a = Some((distance, value));
            }
            if best_b.map_or(true, |(_, best)| value < best) {
                best_b = Some((distance, value));
            }
        }

        let counted = stats.count();
        Self {
            delta: StatsSummary::from(&stats),
            final_gap: delta.final_gap(),
            max_gain_a_at: best_a.filter(|(_, v)| *v > 0.0).map(|(d, _)| d),
            max_gain_b_at: best_b.filter(|(_, v)| *v < 0.0).map(|(d, _)| d),
            a_ahead_ratio: if counted > 0 {
                a_ahead as f64 / counted as f64
            } else {
                0.0
            },
        }
    }

    /// Leader at the finish line
    pub fn leader(&self) -> Leader {
        match self.final_gap {
            Some(gap) if gap > 0.0 => Leader::A,
            Some(gap) if gap < 0.0 => Leader::B,
            _ => Leader::Level,
        }
    }
}

impl std::fmt::Display for DeltaSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Delta (s): {}", self.delta)?;
        match self.final_gap {
            Some(gap) => writeln!(f, "Final gap: {:+.3}s", gap)?,
            None => writeln!(f, "Final gap: N/A")?,
        }
        if let Some(at) = self.max_gain_a_at {
            writeln!(f, "Largest A advantage at: {:.0} m", at)?;
        }
        if let Some(at) = self.max_gain_b_at {
            writeln!(f, "Largest B advantage at: {:.0} m", at)?;
        }
        write!(f, "A ahead: {:.1}% of lap", self.a_ahead_ratio * 100.0)
    }
}

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
