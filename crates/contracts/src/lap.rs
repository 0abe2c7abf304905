//! RawLap - Data provider lap records and lap selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::DriverCode;

/// Lap number within a session (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LapNumber(NonZeroU32);

impl LapNumber {
    /// Returns `None` for lap 0.
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for LapNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which lap of each driver to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LapSelection {
    /// Same lap number for both drivers; both must have it.
    ByLapNumber(LapNumber),
    /// Each driver's personal fastest timed lap, chosen independently.
    #[default]
    Fastest,
}

impl From<Option<LapNumber>> for LapSelection {
    fn from(lap: Option<LapNumber>) -> Self {
        lap.map_or(Self::Fastest, Self::ByLapNumber)
    }
}

impl fmt::Display for LapSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByLapNumber(n) => write!(f, "lap {n}"),
            Self::Fastest => f.write_str("fastest lap"),
        }
    }
}

/// One driver's single-lap record, as supplied by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLap {
    /// Driver who drove the lap
    pub driver: DriverCode,

    /// Lap number within the session
    pub lap_number: LapNumber,

    /// Total lap duration; `None` when the lap has no recorded time
    #[serde(default, with = "crate::serde_secs::option")]
    pub duration: Option<Duration>,
}

impl RawLap {
    pub fn new(driver: impl Into<DriverCode>, lap_number: LapNumber, duration: Option<Duration>) -> Self {
        Self {
            driver: driver.into(),
            lap_number,
            duration,
        }
    }

    /// Lap time in seconds, if recorded.
    pub fn lap_time_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }
}

/// Format a lap duration as `m:ss.mmm` (e.g. `1:31.447`).
pub fn format_lap_time(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}
