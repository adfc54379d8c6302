#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave progression and upgrade purchase validation.

use bastion_core::{Command, SimulationStatus, UpgradeError, UpgradeKind, WaveProgress};
use serde::Deserialize;

/// Economy tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upgrade points granted for clearing a wave.
    pub wave_bonus_points: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wave_bonus_points: 2,
        }
    }
}

/// Pure system deciding when waves end and which purchases are affordable.
#[derive(Clone, Copy, Debug, Default)]
pub struct Economy {
    config: Config,
}

impl Economy {
    /// Creates a new economy system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Emits `Command::AdvanceWave` once the wave quota has spawned and no enemy is left.
    pub fn check_wave_completion(
        &self,
        status: SimulationStatus,
        progress: WaveProgress,
        live_enemies: usize,
        out: &mut Vec<Command>,
    ) {
        if !status.is_running() || live_enemies > 0 || !progress.spawning_exhausted() {
            return;
        }

        out.push(Command::AdvanceWave {
            bonus_points: self.config.wave_bonus_points,
        });
    }

    /// Validates a purchase of `kind` against the spendable `points`.
    pub fn purchase(
        &self,
        status: SimulationStatus,
        kind: UpgradeKind,
        points: u32,
    ) -> Result<Command, UpgradeError> {
        if !status.is_running() {
            return Err(UpgradeError::NotRunning);
        }

        let required = kind.cost();
        if points < required {
            return Err(UpgradeError::InsufficientPoints {
                required,
                available: points,
            });
        }

        Ok(Command::ApplyUpgrade { kind })
    }
}
