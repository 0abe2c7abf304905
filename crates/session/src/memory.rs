//! In-memory session provider.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use contracts::{
    CarData, CarSample, DriverCode, LapNumber, ProviderError, RawLap, SessionInfo,
    SessionProvider,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Result, SessionError};

/// Serialized session: session info plus every driver's laps and car data.
///
/// ```json
/// {
///   "info": { "year": 2024, "event": "Italian Grand Prix", "session": "Qualifying" },
///   "drivers": [
///     { "code": "LEC", "team": "Ferrari", "laps": [
///         { "lap_number": 1, "duration": 80.12,
///           "car_data": [ { "time": 0.0, "speed": 290.0, "throttle": 100.0, "brake": false, "gear": 7 } ] }
///     ] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(default)]
    pub info: SessionInfo,

    #[serde(default)]
    pub drivers: Vec<DriverRecord>,
}

/// One driver's entry in a session document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverRecord {
    pub code: DriverCode,

    #[serde(default)]
    pub team: Option<String>,

    #[serde(default)]
    pub laps: Vec<LapRecord>,
}

/// One lap with its car data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapRecord {
    pub lap_number: LapNumber,

    /// Lap time in seconds; absent for laps without a valid time
    #[serde(default, with = "contracts::serde_secs::option")]
    pub duration: Option<Duration>,

    /// Car data samples; empty when the provider has no telemetry for the lap
    #[serde(default)]
    pub car_data: Vec<CarSample>,
}

/// `SessionProvider` over a validated [`SessionDocument`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySession {
    document: SessionDocument,
}

impl InMemorySession {
    /// Create an empty session.
    pub fn new(info: SessionInfo) -> Self {
        Self {
            document: SessionDocument {
                info,
                drivers: Vec::new(),
            },
        }
    }

    /// Wrap a document after checking that driver codes and lap numbers are unique.
    pub fn from_document(mut document: SessionDocument) -> Result<Self> {
        let mut drivers = HashSet::new();
        for driver in &mut document.drivers {
            if !drivers.insert(driver.code.clone()) {
                return Err(SessionError::DuplicateDriver {
                    driver: driver.code.to_string(),
                });
            }

            let mut laps = HashSet::new();
            for lap in &driver.laps {
                if !laps.insert(lap.lap_number) {
                    return Err(SessionError::DuplicateLap {
                        driver: driver.code.to_string(),
                        lap: lap.lap_number.get(),
                    });
                }
            }
            driver.laps.sort_by_key(|lap| lap.lap_number);
        }

        debug!(
            event = %document.info.event,
            session = %document.info.session,
            drivers = document.drivers.len(),
            "session loaded"
        );

        Ok(Self { document })
    }

    /// Parse a session JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_document(serde_json::from_str(content)?)
    }

    /// Read and parse a session JSON file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize the session back to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    pub fn document(&self) -> &SessionDocument {
        &self.document
    }

    /// Add (or replace) a driver entry.
    pub fn insert_driver(&mut self, code: impl Into<DriverCode>, team: Option<&str>) -> &mut Self {
        let code = code.into();
        self.document.drivers.retain(|d| d.code != code);
        self.document.drivers.push(DriverRecord {
            code,
            team: team.map(str::to_string),
            laps: Vec::new(),
        });
        self
    }

    /// Add (or replace) a lap for an existing driver. Unknown drivers are added without a team.
    pub fn insert_lap(
        &mut self,
        driver: impl Into<DriverCode>,
        lap_number: LapNumber,
        duration: Option<Duration>,
        car_data: Vec<CarSample>,
    ) -> &mut Self {
        let driver = driver.into();
        if self.record(&driver).is_none() {
            self.insert_driver(driver.clone(), None);
        }
        if let Some(record) = self.document.drivers.iter_mut().find(|d| d.code == driver) {
            record.laps.retain(|lap| lap.lap_number != lap_number);
            record.laps.push(LapRecord {
                lap_number,
                duration,
                car_data,
            });
            record.laps.sort_by_key(|lap| lap.lap_number);
        }
        self
    }

    fn record(&self, driver: &DriverCode) -> Option<&DriverRecord> {
        self.document.drivers.iter().find(|d| &d.code == driver)
    }
}

impl SessionProvider for InMemorySession {
    fn session_info(&self) -> &SessionInfo {
        &self.document.info
    }

    fn drivers(&self) -> Vec<DriverCode> {
        self.document.drivers.iter().map(|d| d.code.clone()).collect()
    }

    fn laps(&self, driver: &DriverCode) -> Vec<RawLap> {
        self.record(driver)
            .map(|record| {
                record
                    .laps
                    .iter()
                    .map(|lap| RawLap::new(record.code.clone(), lap.lap_number, lap.duration))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn team_of(&self, driver: &DriverCode) -> Option<&str> {
        self.record(driver).and_then(|d| d.team.as_deref())
    }

    fn car_data(&self, lap: &RawLap) -> std::result::Result<CarData, ProviderError> {
        let samples = self
            .record(&lap.driver)
            .and_then(|d| d.laps.iter().find(|l| l.lap_number == lap.lap_number))
            .map(|l| l.car_data.clone())
            .filter(|samples| !samples.is_empty())
            .ok_or_else(|| ProviderError::NoCarData {
                driver: lap.driver.clone(),
                lap: lap.lap_number,
            })?;

        trace!(
            driver = %lap.driver,
            lap = %lap.lap_number,
            samples = samples.len(),
            "car data served"
        );

        Ok(CarData {
            driver: lap.driver.clone(),
            lap_number: lap.lap_number,
            samples,
        })
    }
}
