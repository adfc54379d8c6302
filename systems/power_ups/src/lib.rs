#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Power-up engine: expires effects, retires stale pickups, spawns new
//! pickups on a randomized cooldown and validates collection requests.

use std::time::Duration;

use bastion_core::{
    ActiveEffect, ArenaBounds, CollectError, Command, PickupId, PickupView, PowerUpKind,
    SimulationStatus, Timers, Vec2,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

/// Tuning of pickup spawning and retirement.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Probability that an eligible tick spawns a pickup.
    pub spawn_chance: f64,
    /// Fixed part of the cooldown that follows a spawn.
    pub cooldown_min_ms: u64,
    /// Upper bound of the uniformly drawn extra cooldown.
    pub cooldown_spread_ms: u64,
    /// Pending pickups beyond which no new pickup spawns.
    pub max_pending: usize,
    /// Distance kept between pickups and the arena border.
    pub edge_inset: f32,
    /// Age at which an uncollected pickup is removed; zero keeps pickups forever.
    pub pickup_lifetime_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spawn_chance: 0.02,
            cooldown_min_ms: 15_000,
            cooldown_spread_ms: 10_000,
            max_pending: 3,
            edge_inset: 50.0,
            pickup_lifetime_ms: 30_000,
        }
    }
}

/// Pure system owning the randomness behind pickup spawning.
#[derive(Debug)]
pub struct PowerUps {
    config: Config,
    rng: ChaCha8Rng,
}

impl PowerUps {
    /// Creates a new power-up engine using the supplied configuration and seed.
    #[must_use]
    pub fn new(config: Config, rng_seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }

    /// Restarts the random stream from `rng_seed`.
    pub fn reseed(&mut self, rng_seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(rng_seed);
    }

    /// Emits expiry, despawn and spawn commands for the tick at `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle(
        &mut self,
        now: Duration,
        status: SimulationStatus,
        effects: &[ActiveEffect],
        pickups: &PickupView,
        timers: &Timers,
        bounds: ArenaBounds,
        out: &mut Vec<Command>,
    ) {
        if !status.is_running() {
            return;
        }

        for effect in effects.iter().filter(|effect| effect.expires_at <= now) {
            out.push(Command::ExpirePowerUp { kind: effect.kind });
        }

        let retired = self.retire_stale(now, pickups, out);
        let pending = pickups.len().saturating_sub(retired);
        self.try_spawn(now, pending, timers, bounds, out);
    }

    /// Validates a collection request and converts it into a command.
    pub fn collect(
        &self,
        status: SimulationStatus,
        pickups: &PickupView,
        pickup: PickupId,
        now: Duration,
    ) -> Result<Command, CollectError> {
        if !status.is_running() {
            return Err(CollectError::NotRunning);
        }

        if pickups.get(pickup).is_none() {
            return Err(CollectError::UnknownPickup(pickup));
        }

        Ok(Command::CollectPickup { pickup, at: now })
    }

    fn retire_stale(&self, now: Duration, pickups: &PickupView, out: &mut Vec<Command>) -> usize {
        if self.config.pickup_lifetime_ms == 0 {
            return 0;
        }

        let lifetime = Duration::from_millis(self.config.pickup_lifetime_ms);
        let mut retired = 0;
        for pickup in pickups
            .iter()
            .filter(|pickup| now.saturating_sub(pickup.spawned_at) >= lifetime)
        {
            out.push(Command::DespawnPickup { pickup: pickup.id });
            retired += 1;
        }
        retired
    }

    fn try_spawn(
        &mut self,
        now: Duration,
        pending: usize,
        timers: &Timers,
        bounds: ArenaBounds,
        out: &mut Vec<Command>,
    ) {
        if pending >= self.config.max_pending || now < timers.next_pickup_at {
            return;
        }

        if !self.rng.gen_bool(self.config.spawn_chance.clamp(0.0, 1.0)) {
            return;
        }

        let kind = PowerUpKind::ALL[self.rng.gen_range(0..PowerUpKind::ALL.len())];
        let position = self.placement(bounds);
        let cooldown = Duration::from_millis(self.config.cooldown_min_ms)
            + Duration::from_millis(self.spread());
        out.push(Command::SpawnPickup {
            kind,
            position,
            at: now,
            next_spawn_at: now.saturating_add(cooldown),
        });
    }

    fn spread(&mut self) -> u64 {
        if self.config.cooldown_spread_ms == 0 {
            return 0;
        }
        self.rng.gen_range(0..self.config.cooldown_spread_ms)
    }

    fn placement(&mut self, bounds: ArenaBounds) -> Vec2 {
        let inset = self.config.edge_inset;
        let span_x = (bounds.width - 2.0 * inset).max(0.0);
        let span_y = (bounds.height - 2.0 * inset).max(0.0);
        Vec2::new(
            inset + self.rng.gen::<f32>() * span_x,
            inset + self.rng.gen::<f32>() * span_y,
        )
    }
}
