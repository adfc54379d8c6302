#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-order scheduler driving a Bastion session.
//!
//! [`Simulation`] owns the world and every system. Each tick runs the phases
//! power-ups, movement, spawning, player attack, enemy attacks, regeneration,
//! wave completion and the game-over check. Commands emitted by a phase are
//! applied before the next phase queries the world.

mod config;

use std::time::Duration;

use bastion_core::{
    ActiveEffect, CollectError, Command, DefenderSnapshot, DefenderStats, EconomySnapshot,
    EnemySnapshot, Event, PickupId, PickupSnapshot, SessionSummary, SimulationStatus,
    UpgradeError, UpgradeKind, WaveProgress,
};
use bastion_system_combat::Combat;
use bastion_system_economy::Economy;
use bastion_system_movement::Movement;
use bastion_system_power_ups::PowerUps;
use bastion_system_spawning::Spawning;
use bastion_world::{self as world, query, World};
use log::{debug, info, trace, warn};

pub use config::{ConfigError, SimulationConfig};

/// Offset separating the power-up random stream from the spawning stream.
const POWER_UP_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Read-only state handed to presentation collaborators after every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Lifecycle status.
    pub status: SimulationStatus,
    /// Timestamp of the last simulated tick.
    pub now: Duration,
    /// Defender position, health and stats.
    pub defender: DefenderSnapshot,
    /// Live enemies in spawn order.
    pub enemies: Vec<EnemySnapshot>,
    /// Pending pickups in creation order.
    pub pickups: Vec<PickupSnapshot>,
    /// Active power-up effects in activation order.
    pub active_effects: Vec<ActiveEffect>,
    /// Score, wave and upgrade points.
    pub economy: EconomySnapshot,
    /// Spawn and kill counters of the current wave.
    pub wave: WaveProgress,
}

/// Outcome of a successful upgrade purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpgradeReceipt {
    /// Upgrade that was bought.
    pub kind: UpgradeKind,
    /// Points spent.
    pub cost: u32,
    /// Points left afterwards.
    pub remaining_points: u32,
    /// Base stats after the upgrade.
    pub base: DefenderStats,
    /// Current defender health after the upgrade.
    pub health: u32,
}

/// Scheduler owning the world and the systems that drive it.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    world: World,
    movement: Movement,
    spawning: Spawning,
    combat: Combat,
    power_ups: PowerUps,
    economy: Economy,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    /// Creates a running session from `config`.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let spawning = Spawning::new(config.spawning.clone(), config.seed)?;
        info!(
            "starting session with seed {:#x} on a {}x{} arena",
            config.seed, config.world.bounds.width, config.world.bounds.height
        );

        Ok(Self {
            world: World::with_config(config.world.clone()),
            movement: Movement::new(),
            spawning,
            combat: Combat::new(config.combat),
            power_ups: PowerUps::new(config.power_ups, power_up_seed(config.seed)),
            economy: Economy::new(config.economy),
            commands: Vec::new(),
            events: Vec::new(),
            config,
        })
    }

    /// Configuration the session started from.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> SimulationStatus {
        query::status(&self.world)
    }

    /// Advances the session by one tick at `now`; ignored unless running.
    pub fn tick(&mut self, now: Duration) {
        self.events.clear();
        if !self.status().is_running() {
            return;
        }

        self.submit(Command::Tick { now });
        self.run_power_ups(now);
        self.run_movement();
        self.run_spawning(now);
        self.run_player_attack(now);
        self.run_enemy_attacks();
        self.run_regeneration(now);
        self.run_wave_check();
        self.run_game_over_check();

        trace!(
            "tick {} at {:?} produced {} events",
            query::tick_index(&self.world),
            now,
            self.events.len()
        );
    }

    /// Suspends a running session.
    pub fn pause(&mut self) {
        self.submit(Command::Pause);
    }

    /// Resumes a paused session.
    pub fn resume(&mut self) {
        self.submit(Command::Resume);
    }

    /// Returns every component to the configured session defaults.
    ///
    /// Random streams restart from the configured seed, so a reset session
    /// replays exactly like a fresh one.
    pub fn reset(&mut self) {
        self.spawning.reseed(self.config.seed);
        self.power_ups.reseed(power_up_seed(self.config.seed));
        self.submit(Command::Reset);
    }

    /// Buys `kind` with upgrade points.
    pub fn apply_upgrade(&mut self, kind: UpgradeKind) -> Result<UpgradeReceipt, UpgradeError> {
        let points = query::economy(&self.world).upgrade_points;
        let command = match self.economy.purchase(self.status(), kind, points) {
            Ok(command) => command,
            Err(reason) => {
                self.reject(Event::UpgradeRejected { kind, reason });
                return Err(reason);
            }
        };
        self.submit(command);

        let defender = query::defender(&self.world);
        Ok(UpgradeReceipt {
            kind,
            cost: kind.cost(),
            remaining_points: query::economy(&self.world).upgrade_points,
            base: defender.base,
            health: defender.health,
        })
    }

    /// Collects a pending pickup at `now` and returns the new effective stats.
    pub fn collect_power_up(
        &mut self,
        pickup: PickupId,
        now: Duration,
    ) -> Result<DefenderStats, CollectError> {
        let pickups = query::pickup_view(&self.world);
        let command = match self.power_ups.collect(self.status(), &pickups, pickup, now) {
            Ok(command) => command,
            Err(reason) => {
                self.reject(Event::CollectRejected { pickup, reason });
                return Err(reason);
            }
        };
        self.submit(command);

        Ok(query::effective_stats(&self.world))
    }

    /// Captures the state presentation collaborators render.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            status: query::status(&self.world),
            now: query::now(&self.world),
            defender: query::defender(&self.world),
            enemies: query::enemy_view(&self.world).into_vec(),
            pickups: query::pickup_view(&self.world).iter().copied().collect(),
            active_effects: query::active_effects(&self.world),
            economy: query::economy(&self.world),
            wave: query::wave_progress(&self.world),
        }
    }

    /// Events produced by the last tick and any command issued since.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Statistics to hand to the persistence collaborator.
    #[must_use]
    pub fn session_summary(&self) -> SessionSummary {
        query::session_summary(&self.world)
    }

    fn run_power_ups(&mut self, now: Duration) {
        self.power_ups.handle(
            now,
            query::status(&self.world),
            &query::active_effects(&self.world),
            &query::pickup_view(&self.world),
            &query::timers(&self.world),
            query::bounds(&self.world),
            &mut self.commands,
        );
        self.flush();
    }

    fn run_movement(&mut self) {
        self.movement.handle(
            query::status(&self.world),
            &query::enemy_view(&self.world),
            query::defender(&self.world).position,
            &mut self.commands,
        );
        self.flush();
    }

    fn run_spawning(&mut self, now: Duration) {
        self.spawning.handle(
            now,
            query::status(&self.world),
            query::wave_progress(&self.world),
            &query::timers(&self.world),
            query::bounds(&self.world),
            &mut self.commands,
        );
        self.flush();
    }

    fn run_player_attack(&mut self, now: Duration) {
        self.combat.resolve_player_attack(
            now,
            query::status(&self.world),
            &query::defender(&self.world),
            &query::timers(&self.world),
            &query::enemy_view(&self.world),
            &mut self.commands,
        );
        self.flush();
    }

    fn run_enemy_attacks(&mut self) {
        self.combat.resolve_enemy_attacks(
            query::status(&self.world),
            &query::defender(&self.world),
            &query::enemy_view(&self.world),
            &mut self.commands,
        );
        self.flush();
    }

    fn run_regeneration(&mut self, now: Duration) {
        self.combat.resolve_regeneration(
            now,
            query::status(&self.world),
            &query::defender(&self.world),
            &query::timers(&self.world),
            &mut self.commands,
        );
        self.flush();
    }

    fn run_wave_check(&mut self) {
        self.economy.check_wave_completion(
            query::status(&self.world),
            query::wave_progress(&self.world),
            query::live_enemy_count(&self.world),
            &mut self.commands,
        );
        self.flush();
    }

    fn run_game_over_check(&mut self) {
        if query::defender(&self.world).health == 0 {
            self.submit(Command::EndSession);
        }
    }

    fn submit(&mut self, command: Command) {
        self.commands.push(command);
        self.flush();
    }

    fn flush(&mut self) {
        let first_new = self.events.len();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        for event in &self.events[first_new..] {
            log_event(event, &self.world);
        }
    }

    fn reject(&mut self, event: Event) {
        log_event(&event, &self.world);
        self.events.push(event);
    }
}

fn power_up_seed(seed: u64) -> u64 {
    seed ^ POWER_UP_STREAM
}

fn log_event(event: &Event, world: &World) {
    match event {
        Event::WaveAdvanced { wave, bonus_points } => {
            info!("wave {wave} started, {bonus_points} bonus points granted");
        }
        Event::StatusChanged { status } => {
            if *status == SimulationStatus::Over {
                let summary = query::session_summary(world);
                info!(
                    "session over at wave {} with score {} after {} kills",
                    summary.final_wave, summary.final_score, summary.enemies_defeated
                );
            } else {
                info!("session {status:?}");
            }
        }
        Event::SessionReset => info!("session reset"),
        Event::UpgradeRejected { kind, reason } => warn!("upgrade {kind:?} rejected: {reason}"),
        Event::CollectRejected { pickup, reason } => {
            warn!("collecting pickup {} rejected: {reason}", pickup.get());
        }
        Event::UpgradeApplied {
            kind,
            remaining_points,
            ..
        } => debug!("bought {}, {remaining_points} points left", kind.label()),
        Event::PowerUpActivated {
            kind,
            refreshed: true,
            ..
        } => debug!("refreshed {kind:?}"),
        _ => {}
    }
}
