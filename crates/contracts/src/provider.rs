//! Collaborator traits - data provider and styling lookup.
//!
//! The comparison core only talks to the outside world through these two
//! traits. Session retrieval and color tables live behind them.

use serde::{Deserialize, Serialize};

use crate::{CarData, Color, DriverCode, ProviderError, RawLap, StylingError};

/// Session identification, used for logging and reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Season year
    pub year: u16,
    /// Event name (e.g. "Italian Grand Prix")
    pub event: String,
    /// Session name (e.g. "Qualifying")
    pub session: String,
}

/// Motorsport data provider for one session.
///
/// # Example
///
/// ```ignore
/// let laps = provider.laps(&"VER".into());
/// let series = provider.car_data(&laps[0])?.with_distance()?;
/// ```
pub trait SessionProvider {
    fn session_info(&self) -> &SessionInfo;

    /// Driver codes present in the session, in provider order.
    fn drivers(&self) -> Vec<DriverCode>;

    /// All laps of `driver` in lap order. Empty when the driver is not in the session.
    fn laps(&self, driver: &DriverCode) -> Vec<RawLap>;

    /// Team name of `driver`, if known.
    fn team_of(&self, driver: &DriverCode) -> Option<&str>;

    /// Raw car data for one lap (no distance channel yet).
    ///
    /// # Errors
    /// Any retrieval failure; callers treat it as non-transient.
    fn car_data(&self, lap: &RawLap) -> Result<CarData, ProviderError>;
}

/// Styling collaborator: display color per driver.
pub trait ColorResolver {
    /// # Errors
    /// `StylingError` for unknown drivers or teams. Callers substitute a fallback.
    fn color_for(
        &self,
        driver: &DriverCode,
        session: &dyn SessionProvider,
    ) -> Result<Color, StylingError>;
}
