//! Serializable comparison report.

use std::collections::BTreeMap;
use std::fmt;

use contracts::{
    format_lap_time, AlignedSeries, Channel, Color, ComparisonStats, DistanceGrid, DriverCode,
    LapNumber, LapSelection, Leader, RawLap, SessionInfo,
};
use observability::DeltaSummary;
use serde::Serialize;

use crate::Comparison;

/// Summary of a finished comparison, suitable for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub session: SessionInfo,
    pub selection: LapSelection,
    pub driver_a: DriverReport,
    pub driver_b: DriverReport,
    pub stats: ComparisonStats,
    pub delta: DeltaSummary,
    /// Who is ahead at the end of the grid
    pub leader: Leader,
    pub grid_points: usize,

    /// Aligned channel traces, only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traces: Option<Traces>,
}

/// Per-driver part of a report
#[derive(Debug, Clone, Serialize)]
pub struct DriverReport {
    pub driver: DriverCode,
    pub lap_number: LapNumber,
    /// `m:ss.mmm`
    pub lap_time: Option<String>,
    pub lap_time_secs: Option<f64>,
    pub color: Color,
    /// Highest aligned speed (km/h)
    pub top_speed: f64,
}

/// Aligned traces on the shared grid
#[derive(Debug, Clone, Serialize)]
pub struct Traces {
    pub distance: DistanceGrid,
    pub a: ChannelTraces,
    pub b: ChannelTraces,
    /// `B.time - A.time` per grid point (s)
    pub delta: Vec<f64>,
}

/// Channel name -> values
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ChannelTraces(pub BTreeMap<&'static str, Vec<f64>>);

impl ChannelTraces {
    fn from_series(series: &AlignedSeries) -> Self {
        Self(
            Channel::ALL
                .iter()
                .map(|&channel| (channel.name(), series.channel(channel).to_vec()))
                .collect(),
        )
    }

    pub fn get(&self, channel: Channel) -> Option<&[f64]> {
        self.0.get(channel.name()).map(Vec::as_slice)
    }
}

impl DriverReport {
    fn new(lap: &RawLap, series: &AlignedSeries) -> Self {
        Self {
            driver: lap.driver.clone(),
            lap_number: lap.lap_number,
            lap_time: lap.duration.map(format_lap_time),
            lap_time_secs: lap.lap_time_secs(),
            color: series.color.clone(),
            top_speed: series.speed.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl ComparisonReport {
    pub fn new(
        session: &SessionInfo,
        selection: LapSelection,
        comparison: &Comparison,
        include_channels: bool,
    ) -> Self {
        let Comparison {
            lap_a,
            lap_b,
            aligned,
            delta,
            stats,
        } = comparison;

        let traces = include_channels.then(|| Traces {
            distance: aligned.grid().clone(),
            a: ChannelTraces::from_series(&aligned.a),
            b: ChannelTraces::from_series(&aligned.b),
            delta: delta.values().to_vec(),
        });

        Self {
            session: session.clone(),
            selection,
            driver_a: DriverReport::new(lap_a, &aligned.a),
            driver_b: DriverReport::new(lap_b, &aligned.b),
            stats: *stats,
            delta: DeltaSummary::from_delta(delta),
            leader: delta
                .len()
                .checked_sub(1)
                .and_then(|last| delta.leader_at(last))
                .unwrap_or(Leader::Level),
            grid_points: delta.len(),
            traces,
        }
    }

    /// Driver code of the leader at the end of the grid, if any.
    pub fn leader_code(&self) -> Option<&DriverCode> {
        match self.leader {
            Leader::A => Some(&self.driver_a.driver),
            Leader::B => Some(&self.driver_b.driver),
            Leader::Level => None,
        }
    }
}

impl fmt::Display for DriverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lap {}  {}  top {:.1} km/h  ({})",
            self.driver,
            self.lap_number,
            self.lap_time.as_deref().unwrap_or("no time"),
            self.top_speed,
            self.color
        )
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== {} {} - {} ===",
            self.session.year, self.session.event, self.session.session
        )?;
        writeln!(f, "Selection: {}", self.selection)?;
        writeln!(f, "A: {}", self.driver_a)?;
        writeln!(f, "B: {}", self.driver_b)?;
        writeln!(f, "Grid points: {}", self.grid_points)?;
        writeln!(f, "Top speed diff: {:+.1} km/h", self.stats.top_speed_diff)?;
        writeln!(
            f,
            "Avg throttle: A {:.1}% / B {:.1}%",
            self.stats.avg_throttle_a, self.stats.avg_throttle_b
        )?;
        writeln!(f, "Lap time diff: {:+.3}s", self.stats.lap_time_diff)?;
        writeln!(f, "{}", self.delta)?;
        match self.leader_code() {
            Some(driver) => write!(f, "Ahead at finish: {}", driver),
            None => write!(f, "Ahead at finish: level"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Comparator, ComparisonRequest};
    use contracts::LapNumber;
    use session::{InMemorySession, SyntheticLap, TeamPalette};

    fn session() -> InMemorySession {
        let mut session = InMemorySession::new(SessionInfo {
            year: 2024,
            event: "Italian Grand Prix".to_string(),
            session: "Qualifying".to_string(),
        });
        let lap = LapNumber::new(1).unwrap();
        for (driver, pace) in [("LEC", 1.0), ("PIA", 0.995)] {
            let (samples, lap_time) = SyntheticLap::new(driver, lap).with_pace(pace).generate();
            session.insert_lap(driver, lap, Some(lap_time), samples);
        }
        session
    }

    fn report(include_channels: bool) -> ComparisonReport {
        let session = session();
        let palette = TeamPalette::new().with_driver("LEC", "#E8002D");
        let mut comparator = Comparator::new(
            &session,
            &palette,
            ComparisonRequest::new("LEC", "PIA", LapSelection::Fastest),
        );
        comparator.process().unwrap();
        comparator.report(include_channels).unwrap()
    }

    #[test]
    fn test_report_fields() {
        let report = report(false);

        assert_eq!(report.driver_a.driver, "LEC");
        assert_eq!(report.driver_a.color.as_str(), "#E8002D");
        assert_eq!(report.driver_b.color, Color::fallback());
        assert!(report.driver_a.lap_time.as_deref().unwrap().starts_with("1:"));
        assert_eq!(report.leader, Leader::A);
        assert_eq!(report.leader_code().map(|d| d.as_str()), Some("LEC"));
        assert_eq!(report.delta.delta.count as usize, report.grid_points);
        assert!(report.traces.is_none());
    }

    #[test]
    fn test_report_json_without_traces() {
        let json = serde_json::to_value(report(false)).unwrap();
        assert_eq!(json["selection"], "fastest");
        assert_eq!(json["leader"], "a");
        assert!(json.get("traces").is_none());
        assert!(json["stats"]["lap_time_diff"].as_f64().unwrap() < 0.0);
    }

    #[test]
    fn test_report_with_traces() {
        let report = report(true);
        let traces = report.traces.as_ref().unwrap();

        assert_eq!(traces.distance.len(), report.grid_points);
        assert_eq!(traces.delta.len(), report.grid_points);
        for channel in Channel::ALL {
            assert_eq!(traces.a.get(channel).unwrap().len(), report.grid_points);
            assert_eq!(traces.b.get(channel).unwrap().len(), report.grid_points);
        }

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["traces"]["a"]["speed"].is_array());
    }

    #[test]
    fn test_display() {
        let text = report(false).to_string();
        assert!(text.contains("2024 Italian Grand Prix - Qualifying"));
        assert!(text.contains("Selection: fastest lap"));
        assert!(text.contains("Ahead at finish: LEC"));
    }
}
