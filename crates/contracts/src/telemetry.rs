//! Telemetry samples as delivered by the data provider, before and after
//! distance augmentation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::{DriverCode, LapNumber, ProviderError};

/// Per-sample channel that gets resampled onto the distance grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Elapsed time since lap start (seconds)
    Time,
    /// Speed (km/h)
    Speed,
    /// Throttle pedal (0-100 %)
    Throttle,
    /// Brake state (0.0 released / 1.0 pressed)
    Brake,
    /// Gear number
    Gear,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Time,
        Channel::Speed,
        Channel::Throttle,
        Channel::Brake,
        Channel::Gear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Time => "time",
            Channel::Speed => "speed",
            Channel::Throttle => "throttle",
            Channel::Brake => "brake",
            Channel::Gear => "gear",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Car data sample without distance information.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarSample {
    /// Elapsed time since lap start
    #[serde(with = "crate::serde_secs")]
    pub time: Duration,

    /// Speed (km/h)
    pub speed: f64,

    /// Throttle pedal (0-100 %)
    pub throttle: f64,

    /// Brake pressed
    pub brake: bool,

    /// Gear number
    pub gear: u8,
}

/// Raw car data for one lap, as returned by [`crate::SessionProvider::car_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarData {
    pub driver: DriverCode,
    pub lap_number: LapNumber,
    pub samples: Vec<CarSample>,
}

impl CarData {
    /// Annotate every sample with its running distance along the lap.
    ///
    /// Distance is integrated from speed over elapsed time:
    /// `d[0] = 0`, `d[i] = d[i-1] + speed[i] / 3.6 * (t[i] - t[i-1])`.
    ///
    /// # Errors
    /// `ProviderError::InvalidCarData` when there are no samples, when elapsed
    /// time goes backwards, or when a speed value is not finite.
    pub fn with_distance(self) -> Result<RawSeries, ProviderError> {
        if self.samples.is_empty() {
            return Err(ProviderError::invalid_car_data(format!(
                "driver '{}' lap {} has no car data samples",
                self.driver, self.lap_number
            )));
        }

        let mut samples = Vec::with_capacity(self.samples.len());
        let mut distance = 0.0;
        let mut previous: Option<Duration> = None;

        for (index, sample) in self.samples.iter().enumerate() {
            if !sample.speed.is_finite() {
                return Err(ProviderError::invalid_car_data(format!(
                    "non-finite speed at sample {index}"
                )));
            }
            if let Some(prev) = previous {
                let dt = sample.time.checked_sub(prev).ok_or_else(|| {
                    ProviderError::invalid_car_data(format!(
                        "elapsed time goes backwards at sample {index}"
                    ))
                })?;
                distance += sample.speed / 3.6 * dt.as_secs_f64();
            }
            previous = Some(sample.time);

            samples.push(TelemetrySample {
                distance,
                time: sample.time,
                speed: sample.speed,
                throttle: sample.throttle,
                brake: sample.brake,
                gear: sample.gear,
            });
        }

        Ok(RawSeries::new(self.driver, self.lap_number, samples))
    }
}

/// Telemetry sample annotated with distance along the lap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Distance since lap start (meters)
    pub distance: f64,

    /// Elapsed time since lap start
    #[serde(with = "crate::serde_secs")]
    pub time: Duration,

    /// Speed (km/h)
    pub speed: f64,

    /// Throttle pedal (0-100 %)
    pub throttle: f64,

    /// Brake pressed
    pub brake: bool,

    /// Gear number
    pub gear: u8,
}

impl TelemetrySample {
    /// Numeric value of `channel` for interpolation.
    #[inline]
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Time => self.time.as_secs_f64(),
            Channel::Speed => self.speed,
            Channel::Throttle => self.throttle,
            Channel::Brake => {
                if self.brake {
                    1.0
                } else {
                    0.0
                }
            }
            Channel::Gear => f64::from(self.gear),
        }
    }
}

/// One driver's distance-annotated telemetry for a single lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    pub driver: DriverCode,
    pub lap_number: LapNumber,
    samples: Vec<TelemetrySample>,
}

impl RawSeries {
    pub fn new(driver: DriverCode, lap_number: LapNumber, samples: Vec<TelemetrySample>) -> Self {
        Self {
            driver,
            lap_number,
            samples,
        }
    }

    pub fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest recorded distance, `None` for an empty series.
    pub fn max_distance(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.distance)
            .fold(None, |acc, d| Some(acc.map_or(d, |m: f64| m.max(d))))
    }

    /// Distance column in sample order.
    pub fn distances(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.distance).collect()
    }

    /// Values of one channel in sample order.
    pub fn channel(&self, channel: Channel) -> Vec<f64> {
        self.samples.iter().map(|s| s.value(channel)).collect()
    }
}
