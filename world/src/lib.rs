#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Bastion.
//!
//! The world owns the defender, the enemy and pickup registries, the active
//! effect ledger, the economy and every gating timestamp. It is mutated only
//! through [`apply`] and read only through the [`query`] module.

mod effects;
mod registry;

use std::time::Duration;

use bastion_core::{
    ArenaBounds, CollectError, Command, DefenderStats, EnemyId, Event, PickupId, SimulationStatus,
    Timers, UpgradeError, UpgradeKind, Vec2,
};
use serde::Deserialize;

use crate::{
    effects::EffectLedger,
    registry::{EnemyState, PickupState, Registry},
};

/// Session defaults the world returns to on every reset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Visible arena; the defender stands at its centre.
    pub bounds: ArenaBounds,
    /// Defender stats at the start of a session.
    pub defender: DefenderStats,
    /// Upgrade points granted at the start of a session.
    pub starting_upgrade_points: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: ArenaBounds::default(),
            defender: DefenderStats::default(),
            starting_upgrade_points: 3,
        }
    }
}

#[derive(Clone, Debug)]
struct Defender {
    position: Vec2,
    health: u32,
    base: DefenderStats,
}

#[derive(Clone, Copy, Debug)]
struct Ledger {
    score: u64,
    upgrade_points: u32,
    wave: u32,
    spawned: u32,
    killed: u32,
    defeated_total: u32,
}

/// Represents the authoritative Bastion world state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    status: SimulationStatus,
    defender: Defender,
    enemies: Registry<EnemyId, EnemyState>,
    pickups: Registry<PickupId, PickupState>,
    effects: EffectLedger,
    ledger: Ledger,
    timers: Timers,
    now: Duration,
    tick_index: u64,
}

impl World {
    /// Creates a new world using the stock session defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a new world that starts from, and resets to, `config`.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            status: SimulationStatus::Running,
            defender: Defender {
                position: config.bounds.center(),
                health: config.defender.max_health,
                base: config.defender,
            },
            enemies: Registry::new(),
            pickups: Registry::new(),
            effects: EffectLedger::default(),
            ledger: Ledger {
                score: 0,
                upgrade_points: config.starting_upgrade_points,
                wave: 1,
                spawned: 0,
                killed: 0,
                defeated_total: 0,
            },
            timers: Timers::default(),
            now: Duration::ZERO,
            tick_index: 0,
            config,
        }
    }

    fn effective_stats(&self) -> DefenderStats {
        self.effects.compose(self.defender.base)
    }

    fn clamp_health(&mut self) {
        let ceiling = self.effective_stats().max_health;
        self.defender.health = self.defender.health.min(ceiling);
    }

    fn strike_enemy(&mut self, enemy: EnemyId, damage: u32, out_events: &mut Vec<Event>) {
        let Some(state) = self.enemies.get_mut(enemy) else {
            return;
        };

        state.health = state.health.saturating_sub(damage);
        if state.health > 0 {
            out_events.push(Event::EnemyDamaged {
                enemy,
                damage,
                remaining: state.health,
            });
            return;
        }

        let Some(defeated) = self.enemies.remove(enemy) else {
            return;
        };
        self.ledger.score = self.ledger.score.saturating_add(u64::from(defeated.reward));
        self.ledger.upgrade_points = self
            .ledger
            .upgrade_points
            .saturating_add(defeated.upgrade_points);
        self.ledger.killed = self.ledger.killed.saturating_add(1);
        self.ledger.defeated_total = self.ledger.defeated_total.saturating_add(1);
        out_events.push(Event::EnemyDefeated {
            enemy,
            category: defeated.category,
            reward: defeated.reward,
            upgrade_points: defeated.upgrade_points,
        });
    }

    fn collect_pickup(&mut self, pickup: PickupId, at: Duration, out_events: &mut Vec<Event>) {
        if !self.status.is_running() {
            out_events.push(Event::CollectRejected {
                pickup,
                reason: CollectError::NotRunning,
            });
            return;
        }

        let Some(collected) = self.pickups.remove(pickup) else {
            out_events.push(Event::CollectRejected {
                pickup,
                reason: CollectError::UnknownPickup(pickup),
            });
            return;
        };

        let expires_at = at.saturating_add(collected.kind.duration());
        let refreshed = self.effects.activate(collected.kind, expires_at);
        self.clamp_health();
        out_events.push(Event::PowerUpActivated {
            kind: collected.kind,
            expires_at,
            refreshed,
        });
    }

    fn apply_upgrade(&mut self, kind: UpgradeKind, out_events: &mut Vec<Event>) {
        if !self.status.is_running() {
            out_events.push(Event::UpgradeRejected {
                kind,
                reason: UpgradeError::NotRunning,
            });
            return;
        }

        let cost = kind.cost();
        if self.ledger.upgrade_points < cost {
            out_events.push(Event::UpgradeRejected {
                kind,
                reason: UpgradeError::InsufficientPoints {
                    required: cost,
                    available: self.ledger.upgrade_points,
                },
            });
            return;
        }

        let delta = kind.delta();
        self.ledger.upgrade_points -= cost;
        self.defender.base = delta.apply(self.defender.base);
        self.defender.health = self.defender.health.saturating_add(delta.health_bonus());
        self.clamp_health();
        out_events.push(Event::UpgradeApplied {
            kind,
            cost,
            remaining_points: self.ledger.upgrade_points,
        });
    }

    fn set_status(&mut self, status: SimulationStatus, out_events: &mut Vec<Event>) {
        if self.status == status {
            return;
        }
        self.status = status;
        out_events.push(Event::StatusChanged { status });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { now } => {
            world.now = now;
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { now });
        }
        Command::MoveEnemy { enemy, to } => {
            if let Some(state) = world.enemies.get_mut(enemy) {
                state.position = to;
            }
        }
        Command::SpawnEnemy {
            profile,
            position,
            at,
        } => {
            let enemy = world.enemies.insert_with(|id| EnemyState {
                id,
                category: profile.category,
                position,
                health: profile.health,
                max_health: profile.health,
                speed: profile.speed,
                attack_damage: profile.attack_damage,
                reward: profile.reward,
                upgrade_points: profile.upgrade_points,
            });
            world.ledger.spawned = world.ledger.spawned.saturating_add(1);
            world.timers.last_spawn = Some(at);
            out_events.push(Event::EnemySpawned {
                enemy,
                category: profile.category,
                position,
            });
        }
        Command::StrikeEnemy { enemy, damage, at } => {
            world.timers.last_attack = Some(at);
            world.strike_enemy(enemy, damage, out_events);
        }
        Command::DamageDefender { amount } => {
            world.defender.health = world.defender.health.saturating_sub(amount);
            out_events.push(Event::DefenderDamaged {
                amount,
                health: world.defender.health,
            });
        }
        Command::HealDefender { amount, at } => {
            world.timers.last_heal = Some(at);
            let before = world.defender.health;
            let ceiling = world.effective_stats().max_health;
            world.defender.health = before.saturating_add(amount).min(ceiling);
            out_events.push(Event::DefenderHealed {
                amount: world.defender.health.saturating_sub(before),
                health: world.defender.health,
            });
        }
        Command::AdvanceWave { bonus_points } => {
            world.ledger.wave = world.ledger.wave.saturating_add(1);
            world.ledger.spawned = 0;
            world.ledger.killed = 0;
            world.ledger.upgrade_points = world.ledger.upgrade_points.saturating_add(bonus_points);
            out_events.push(Event::WaveAdvanced {
                wave: world.ledger.wave,
                bonus_points,
            });
        }
        Command::SpawnPickup {
            kind,
            position,
            at,
            next_spawn_at,
        } => {
            let pickup = world.pickups.insert_with(|id| PickupState {
                id,
                kind,
                position,
                spawned_at: at,
            });
            world.timers.next_pickup_at = next_spawn_at;
            out_events.push(Event::PickupSpawned {
                pickup,
                kind,
                position,
            });
        }
        Command::DespawnPickup { pickup } => {
            if world.pickups.remove(pickup).is_some() {
                out_events.push(Event::PickupDespawned { pickup });
            }
        }
        Command::CollectPickup { pickup, at } => world.collect_pickup(pickup, at, out_events),
        Command::ExpirePowerUp { kind } => {
            if world.effects.expire(kind) {
                world.clamp_health();
                out_events.push(Event::PowerUpExpired { kind });
            }
        }
        Command::ApplyUpgrade { kind } => world.apply_upgrade(kind, out_events),
        Command::EndSession => world.set_status(SimulationStatus::Over, out_events),
        Command::Pause => {
            if world.status == SimulationStatus::Running {
                world.set_status(SimulationStatus::Paused, out_events);
            }
        }
        Command::Resume => {
            if world.status == SimulationStatus::Paused {
                world.set_status(SimulationStatus::Running, out_events);
            }
        }
        Command::Reset => {
            *world = World::with_config(world.config.clone());
            out_events.push(Event::SessionReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use bastion_core::{
        ActiveEffect, ArenaBounds, DefenderSnapshot, DefenderStats, EconomySnapshot,
        EnemySnapshot, EnemyView, PickupSnapshot, PickupView, SessionSummary, SimulationStatus,
        Timers, WaveProgress,
    };

    use super::World;

    /// Current lifecycle status of the session.
    #[must_use]
    pub fn status(world: &World) -> SimulationStatus {
        world.status
    }

    /// Visible arena extent.
    #[must_use]
    pub fn bounds(world: &World) -> ArenaBounds {
        world.config.bounds
    }

    /// Timestamp of the most recently recorded tick.
    #[must_use]
    pub fn now(world: &World) -> Duration {
        world.now
    }

    /// Number of ticks recorded since the session started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the defender's position, health and stats.
    #[must_use]
    pub fn defender(world: &World) -> DefenderSnapshot {
        DefenderSnapshot {
            position: world.defender.position,
            health: world.defender.health,
            base: world.defender.base,
            effective: world.effective_stats(),
        }
    }

    /// Base stats with every active effect folded in, in activation order.
    #[must_use]
    pub fn effective_stats(world: &World) -> DefenderStats {
        world.effective_stats()
    }

    /// Captures a read-only view of the live enemies in spawn order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                category: enemy.category,
                position: enemy.position,
                health: enemy.health,
                max_health: enemy.max_health,
                speed: enemy.speed,
                attack_damage: enemy.attack_damage,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Number of live enemies.
    #[must_use]
    pub fn live_enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Captures a read-only view of the pending pickups in creation order.
    #[must_use]
    pub fn pickup_view(world: &World) -> PickupView {
        let snapshots = world
            .pickups
            .iter()
            .map(|pickup| PickupSnapshot {
                id: pickup.id,
                kind: pickup.kind,
                position: pickup.position,
                spawned_at: pickup.spawned_at,
            })
            .collect();
        PickupView::from_snapshots(snapshots)
    }

    /// Active effects in activation order.
    #[must_use]
    pub fn active_effects(world: &World) -> Vec<ActiveEffect> {
        world.effects.entries().to_vec()
    }

    /// Score, wave and spendable points.
    #[must_use]
    pub fn economy(world: &World) -> EconomySnapshot {
        EconomySnapshot {
            score: world.ledger.score,
            wave: world.ledger.wave,
            upgrade_points: world.ledger.upgrade_points,
        }
    }

    /// Spawn and kill counters for the current wave.
    #[must_use]
    pub fn wave_progress(world: &World) -> WaveProgress {
        WaveProgress {
            wave: world.ledger.wave,
            spawned: world.ledger.spawned,
            killed: world.ledger.killed,
        }
    }

    /// Gating timestamps for attacks, regeneration and spawning.
    #[must_use]
    pub fn timers(world: &World) -> Timers {
        world.timers
    }

    /// Statistics reported to the persistence collaborator.
    #[must_use]
    pub fn session_summary(world: &World) -> SessionSummary {
        SessionSummary {
            final_score: world.ledger.score,
            final_wave: world.ledger.wave,
            enemies_defeated: world.ledger.defeated_total,
        }
    }
}
