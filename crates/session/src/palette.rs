//! Team palette - color lookup collaborator.

use std::collections::HashMap;

use contracts::{Color, ColorResolver, DriverCode, SessionProvider, StylingConfig, StylingError};

/// Resolves driver colors from per-driver overrides, then the driver's team color.
#[derive(Debug, Clone, Default)]
pub struct TeamPalette {
    teams: HashMap<String, Color>,
    drivers: HashMap<DriverCode, Color>,
}

impl TeamPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `[styling]` section of a comparison config.
    pub fn from_config(config: &StylingConfig) -> Self {
        let mut palette = Self::new();
        for (team, color) in &config.teams {
            palette = palette.with_team(team, color);
        }
        for (driver, color) in &config.drivers {
            palette = palette.with_driver(driver.as_str(), color);
        }
        palette
    }

    pub fn with_team(mut self, team: &str, color: &str) -> Self {
        self.teams.insert(team.to_string(), Color::new(color));
        self
    }

    pub fn with_driver(mut self, driver: impl Into<DriverCode>, color: &str) -> Self {
        self.drivers.insert(driver.into(), Color::new(color));
        self
    }
}

impl ColorResolver for TeamPalette {
    fn color_for(
        &self,
        driver: &DriverCode,
        session: &dyn SessionProvider,
    ) -> Result<Color, StylingError> {
        if let Some(color) = self.drivers.get(driver) {
            return Ok(color.clone());
        }

        let team = session
            .team_of(driver)
            .ok_or_else(|| StylingError::UnknownDriver {
                driver: driver.clone(),
            })?;

        self.teams
            .get(team)
            .cloned()
            .ok_or_else(|| StylingError::UnknownTeam {
                team: team.to_string(),
            })
    }
}
