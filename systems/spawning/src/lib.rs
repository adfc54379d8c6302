#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.

use std::time::Duration;

use bastion_core::{
    interval_elapsed, ArenaBounds, Command, EnemyCategory, SimulationStatus, Timers, Vec2,
    WaveProgress,
};
use bastion_system_roster::{instantiate, Roster, RosterError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spawn interval on wave one, divided by the wave number afterwards.
    pub base_interval_ms: u64,
    /// Floor applied to the per-wave spawn interval.
    pub min_interval_ms: u64,
    /// Distance outside the arena at which enemies appear.
    pub margin: f32,
    /// Categories that may spawn, lowest tier first.
    pub categories: Vec<EnemyCategory>,
}

impl Config {
    /// Spawn interval that applies on `wave`.
    #[must_use]
    pub fn interval_for_wave(&self, wave: u32) -> Duration {
        let base = Duration::from_millis(self.base_interval_ms) / wave.max(1);
        base.max(Duration::from_millis(self.min_interval_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_interval_ms: 2_000,
            min_interval_ms: 500,
            margin: 50.0,
            categories: EnemyCategory::ALL.to_vec(),
        }
    }
}

/// Pure system that deterministically emits spawn commands while a wave has quota left.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    roster: Roster,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration and seed.
    pub fn new(config: Config, rng_seed: u64) -> Result<Self, RosterError> {
        let roster = Roster::from_categories(&config.categories)?;
        Ok(Self {
            config,
            roster,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        })
    }

    /// Restarts the random stream from `rng_seed`.
    pub fn reseed(&mut self, rng_seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(rng_seed);
    }

    /// Emits at most one `Command::SpawnEnemy` when the spawn interval has elapsed.
    pub fn handle(
        &mut self,
        now: Duration,
        status: SimulationStatus,
        progress: WaveProgress,
        timers: &Timers,
        bounds: ArenaBounds,
        out: &mut Vec<Command>,
    ) {
        if !status.is_running() || progress.spawning_exhausted() {
            return;
        }

        let interval = self.config.interval_for_wave(progress.wave);
        if !interval_elapsed(timers.last_spawn, now, interval) {
            return;
        }

        let template = self.roster.select(progress.wave, &mut self.rng);
        let profile = instantiate(&template, progress.wave);
        let position = self.edge_position(bounds);
        out.push(Command::SpawnEnemy {
            profile,
            position,
            at: now,
        });
    }

    fn edge_position(&mut self, bounds: ArenaBounds) -> Vec2 {
        let margin = self.config.margin;
        let along_x = self.rng.gen::<f32>() * bounds.width;
        let along_y = self.rng.gen::<f32>() * bounds.height;
        match self.rng.gen_range(0..4) {
            0 => Vec2::new(along_x, -margin),
            1 => Vec2::new(bounds.width + margin, along_y),
            2 => Vec2::new(along_x, bounds.height + margin),
            _ => Vec2::new(-margin, along_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_shrinks_with_wave_down_to_floor() {
        let config = Config::default();
        assert_eq!(config.interval_for_wave(1), Duration::from_millis(2_000));
        assert_eq!(config.interval_for_wave(2), Duration::from_millis(1_000));
        assert_eq!(config.interval_for_wave(4), Duration::from_millis(500));
        assert_eq!(config.interval_for_wave(9), Duration::from_millis(500));
    }

    #[test]
    fn edge_positions_sit_outside_the_arena() {
        let mut spawning = Spawning::new(Config::default(), 7).expect("stock roster");
        let bounds = ArenaBounds::default();
        for _ in 0..200 {
            let position = spawning.edge_position(bounds);
            let on_vertical_edge = position.x == -50.0 || position.x == bounds.width + 50.0;
            let on_horizontal_edge = position.y == -50.0 || position.y == bounds.height + 50.0;
            assert!(on_vertical_edge ^ on_horizontal_edge, "{position:?}");
        }
    }

    #[test]
    fn empty_category_list_is_rejected() {
        let config = Config {
            categories: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(
            Spawning::new(config, 1),
            Err(RosterError::Empty)
        ));
    }
}
