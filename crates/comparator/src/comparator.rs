//! Comparator state machine.

use std::fmt;

use alignment::{compute_delta, summarize, AlignedPair, Resampler};
use contracts::{
    CarData, Color, ColorResolver, ComparisonConfig, ComparisonError, ComparisonStats,
    DeltaSeries, DriverCode, LapSelection, RawLap, RawSeries, SessionProvider,
};
use observability::{record_comparison_failure, record_comparison_metrics};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::report::ComparisonReport;
use crate::selection::select_lap;

/// Pipeline stage, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    LapSelection,
    TelemetryFetch,
    Alignment,
    Delta,
    Statistics,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::LapSelection => "lap_selection",
            Stage::TelemetryFetch => "telemetry_fetch",
            Stage::Alignment => "alignment",
            Stage::Delta => "delta",
            Stage::Statistics => "statistics",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparator state
///
/// ```text
/// Created -> LapsSelected -> TelemetryFetched -> Aligned -> StatsReady
///    \____________\_________________\________________\-----> Failed
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparatorState {
    /// Request accepted, nothing processed
    Created,
    /// Both laps chosen
    LapsSelected,
    /// Both laps have distance-annotated telemetry
    TelemetryFetched,
    /// Both laps resampled onto the shared grid
    Aligned,
    /// Delta curve and statistics available
    StatsReady,
    /// Processing stopped; no results are exposed
    Failed { stage: Stage, reason: String },
}

impl ComparatorState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::StatsReady | Self::Failed { .. })
    }
}

/// The two drivers and the lap selection to compare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub driver_a: DriverCode,
    pub driver_b: DriverCode,
    pub selection: LapSelection,
}

impl ComparisonRequest {
    pub fn new(
        driver_a: impl Into<DriverCode>,
        driver_b: impl Into<DriverCode>,
        selection: LapSelection,
    ) -> Self {
        Self {
            driver_a: driver_a.into(),
            driver_b: driver_b.into(),
            selection,
        }
    }
}

impl From<&ComparisonConfig> for ComparisonRequest {
    fn from(config: &ComparisonConfig) -> Self {
        Self {
            driver_a: config.driver_a(),
            driver_b: config.driver_b(),
            selection: config.selection(),
        }
    }
}

/// Results of a finished comparison
#[derive(Debug, Clone)]
pub struct Comparison {
    pub lap_a: RawLap,
    pub lap_b: RawLap,
    pub aligned: AlignedPair,
    pub delta: DeltaSeries,
    pub stats: ComparisonStats,
}

/// Two-driver lap comparison.
///
/// Collaborators are borrowed for the comparator's lifetime; results are only
/// exposed once every stage has succeeded.
pub struct Comparator<'s> {
    session: &'s dyn SessionProvider,
    colors: &'s dyn ColorResolver,
    request: ComparisonRequest,
    resampler: Resampler,
    state: ComparatorState,
    result: Option<Comparison>,
}

impl fmt::Debug for Comparator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("session", self.session.session_info())
            .field("request", &self.request)
            .field("state", &self.state)
            .field("has_result", &self.result.is_some())
            .finish()
    }
}

impl<'s> Comparator<'s> {
    pub fn new(
        session: &'s dyn SessionProvider,
        colors: &'s dyn ColorResolver,
        request: ComparisonRequest,
    ) -> Self {
        Self {
            session,
            colors,
            request,
            resampler: Resampler::default(),
            state: ComparatorState::Created,
            result: None,
        }
    }

    /// Color used when the styling lookup fails for a driver.
    pub fn with_fallback_color(mut self, color: Color) -> Self {
        self.resampler = Resampler::new(color);
        self
    }

    /// Replace the request and discard any previous results.
    pub fn set_request(&mut self, request: ComparisonRequest) {
        self.request = request;
        self.reset();
    }

    /// Run every stage.
    ///
    /// Previous results are discarded first. On failure the state becomes
    /// `Failed` and no partial results are kept.
    ///
    /// # Errors
    /// - `DriverNotFound` / `LapNotFound` during lap selection
    /// - `TelemetryUnavailable` if car data cannot be retrieved or integrated
    /// - `InsufficientData` / `AlignmentMismatch` during alignment
    /// - `MissingLapTime` during statistics
    #[instrument(
        name = "comparator_process",
        skip_all,
        fields(
            driver_a = %self.request.driver_a,
            driver_b = %self.request.driver_b,
            selection = %self.request.selection,
        )
    )]
    pub fn process(&mut self) -> Result<ComparisonStats, ComparisonError> {
        self.reset();

        match self.run() {
            Ok(comparison) => {
                let stats = comparison.stats;
                record_comparison_metrics(&stats, &comparison.delta);
                info!(
                    lap_a = %comparison.lap_a.lap_number,
                    lap_b = %comparison.lap_b.lap_number,
                    grid_points = comparison.delta.len(),
                    final_gap = ?comparison.delta.final_gap(),
                    lap_time_diff = stats.lap_time_diff,
                    "comparison complete"
                );

                self.result = Some(comparison);
                self.state = ComparatorState::StatsReady;
                Ok(stats)
            }
            Err((stage, err)) => {
                warn!(stage = %stage, error = %err, "comparison failed");
                record_comparison_failure(stage.as_str());

                self.state = ComparatorState::Failed {
                    stage,
                    reason: err.to_string(),
                };
                Err(err)
            }
        }
    }

    fn reset(&mut self) {
        self.result = None;
        self.state = ComparatorState::Created;
    }

    fn run(&mut self) -> Result<Comparison, (Stage, ComparisonError)> {
        let (lap_a, lap_b) = self
            .select_laps()
            .map_err(|err| (Stage::LapSelection, err))?;
        self.state = ComparatorState::LapsSelected;
        debug!(
            lap_a = %lap_a.lap_number,
            lap_b = %lap_b.lap_number,
            "laps selected"
        );

        let series_a = self
            .fetch(&lap_a)
            .map_err(|err| (Stage::TelemetryFetch, err))?;
        let series_b = self
            .fetch(&lap_b)
            .map_err(|err| (Stage::TelemetryFetch, err))?;
        self.state = ComparatorState::TelemetryFetched;
        debug!(
            samples_a = series_a.len(),
            samples_b = series_b.len(),
            "telemetry fetched"
        );

        let aligned = self
            .resampler
            .resample(&series_a, &series_b, self.colors, self.session)
            .map_err(|err| (Stage::Alignment, err))?;
        self.state = ComparatorState::Aligned;

        let delta = compute_delta(&aligned.a, &aligned.b).map_err(|err| (Stage::Delta, err))?;
        let stats = summarize(&aligned.a, &aligned.b, &lap_a, &lap_b)
            .map_err(|err| (Stage::Statistics, err))?;

        Ok(Comparison {
            lap_a,
            lap_b,
            aligned,
            delta,
            stats,
        })
    }

    fn select_laps(&self) -> Result<(RawLap, RawLap), ComparisonError> {
        let ComparisonRequest {
            driver_a,
            driver_b,
            selection,
        } = &self.request;

        let laps_a = self.session.laps(driver_a);
        if laps_a.is_empty() {
            return Err(ComparisonError::driver_not_found(driver_a));
        }
        let laps_b = self.session.laps(driver_b);
        if laps_b.is_empty() {
            return Err(ComparisonError::driver_not_found(driver_b));
        }

        Ok((
            select_lap(&laps_a, driver_a, *selection)?,
            select_lap(&laps_b, driver_b, *selection)?,
        ))
    }

    fn fetch(&self, lap: &RawLap) -> Result<RawSeries, ComparisonError> {
        self.session
            .car_data(lap)
            .and_then(CarData::with_distance)
            .map_err(|source| ComparisonError::TelemetryUnavailable {
                driver: lap.driver.clone(),
                lap: lap.lap_number,
                source,
            })
    }

    // ===== Accessors =====

    pub fn state(&self) -> &ComparatorState {
        &self.state
    }

    pub fn request(&self) -> &ComparisonRequest {
        &self.request
    }

    /// All results, once `StatsReady`.
    pub fn comparison(&self) -> Option<&Comparison> {
        self.result.as_ref()
    }

    pub fn laps(&self) -> Option<(&RawLap, &RawLap)> {
        self.result.as_ref().map(|r| (&r.lap_a, &r.lap_b))
    }

    pub fn aligned(&self) -> Option<&AlignedPair> {
        self.result.as_ref().map(|r| &r.aligned)
    }

    pub fn delta(&self) -> Option<&DeltaSeries> {
        self.result.as_ref().map(|r| &r.delta)
    }

    pub fn stats(&self) -> Option<&ComparisonStats> {
        self.result.as_ref().map(|r| &r.stats)
    }

    /// Report of the finished comparison; `include_channels` adds the aligned traces.
    pub fn report(&self, include_channels: bool) -> Option<ComparisonReport> {
        self.result.as_ref().map(|comparison| {
            ComparisonReport::new(
                self.session.session_info(),
                self.request.selection,
                comparison,
                include_channels,
            )
        })
    }
}
