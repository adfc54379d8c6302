//! Session configuration loaded from TOML.

use bastion_system_roster::RosterError;
use bastion_world::WorldConfig;
use serde::Deserialize;
use thiserror::Error;

/// Everything needed to start, and later reset, a session.
///
/// Every section is optional in TOML; omitted keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed of every random stream in the session.
    pub seed: u64,
    /// Arena, defender and starting economy.
    pub world: WorldConfig,
    /// Enemy spawn cadence, placement and roster.
    pub spawning: bastion_system_spawning::Config,
    /// Attack range, contact radius and regeneration cadence.
    pub combat: bastion_system_combat::Config,
    /// Pickup spawning and retirement.
    pub power_ups: bastion_system_power_ups::Config,
    /// Wave completion bonus.
    pub economy: bastion_system_economy::Config,
}

impl SimulationConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x0ba5_7104,
            world: WorldConfig::default(),
            spawning: bastion_system_spawning::Config::default(),
            combat: bastion_system_combat::Config::default(),
            power_ups: bastion_system_power_ups::Config::default(),
            economy: bastion_system_economy::Config::default(),
        }
    }
}

/// Reasons a configuration cannot start a session.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text is malformed or names values of the wrong type.
    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The enemy roster is unusable.
    #[error("invalid enemy roster: {0}")]
    Roster(#[from] RosterError),
}
