#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Bastion engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The scheduler submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values describing
//! what actually happened. Systems query immutable snapshots and respond
//! exclusively with new command batches.

use std::time::Duration;

pub use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of enemies each wave number contributes to the wave quota.
pub const ENEMIES_PER_WAVE: u32 = 5;

/// Lower bound applied to the defender's attack interval, in milliseconds.
pub const MIN_ATTACK_INTERVAL_MS: u32 = 100;

/// Number of enemies that must be spawned and eliminated to clear `wave`.
#[must_use]
pub const fn enemies_required(wave: u32) -> u32 {
    wave.saturating_mul(ENEMIES_PER_WAVE)
}

/// Lifecycle state of a simulation session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimulationStatus {
    /// Ticks advance the world.
    Running,
    /// Ticks are ignored until the session resumes.
    Paused,
    /// The defender fell; only a reset starts a new session.
    Over,
}

impl SimulationStatus {
    /// Reports whether ticks and purchases are currently accepted.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Records the timestamp of the tick that is about to be simulated.
    Tick {
        /// Time elapsed since the session epoch.
        now: Duration,
    },
    /// Relocates a live enemy.
    MoveEnemy {
        /// Identifier of the enemy being moved.
        enemy: EnemyId,
        /// Position the enemy occupies after the move.
        to: Vec2,
    },
    /// Registers a freshly instantiated enemy for the current wave.
    SpawnEnemy {
        /// Wave-scaled statistics of the new enemy.
        profile: EnemyProfile,
        /// Position at which the enemy enters the arena.
        position: Vec2,
        /// Timestamp recorded as the most recent spawn.
        at: Duration,
    },
    /// Applies one defender attack to a live enemy.
    StrikeEnemy {
        /// Enemy receiving the blow.
        enemy: EnemyId,
        /// Damage dealt before any clamping.
        damage: u32,
        /// Timestamp recorded as the defender's most recent attack.
        at: Duration,
    },
    /// Subtracts combined contact damage from the defender.
    DamageDefender {
        /// Health removed from the defender, already reduced by defense.
        amount: u32,
    },
    /// Restores defender health, clamped to the effective maximum.
    HealDefender {
        /// Health restored before clamping.
        amount: u32,
        /// Timestamp recorded as the most recent regeneration.
        at: Duration,
    },
    /// Completes the current wave and opens the next one.
    AdvanceWave {
        /// Upgrade points granted for clearing the wave.
        bonus_points: u32,
    },
    /// Places a power-up pickup in the arena.
    SpawnPickup {
        /// Effect granted when the pickup is collected.
        kind: PowerUpKind,
        /// Location of the pickup.
        position: Vec2,
        /// Creation timestamp of the pickup.
        at: Duration,
        /// Earliest time at which another pickup may spawn.
        next_spawn_at: Duration,
    },
    /// Removes an uncollected pickup whose spawn window elapsed.
    DespawnPickup {
        /// Pickup being removed.
        pickup: PickupId,
    },
    /// Collects a pending pickup and activates or refreshes its effect.
    CollectPickup {
        /// Pickup being collected.
        pickup: PickupId,
        /// Collection timestamp used to derive the effect expiry.
        at: Duration,
    },
    /// Removes an active power-up effect whose expiry elapsed.
    ExpirePowerUp {
        /// Effect being removed.
        kind: PowerUpKind,
    },
    /// Spends upgrade points on a permanent stat improvement.
    ApplyUpgrade {
        /// Upgrade being purchased.
        kind: UpgradeKind,
    },
    /// Ends the session because the defender fell.
    EndSession,
    /// Suspends a running session.
    Pause,
    /// Resumes a paused session.
    Resume,
    /// Reinitialises every part of the world to session defaults.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Timestamp of the tick being simulated.
        now: Duration,
    },
    /// Confirms that an enemy entered the arena.
    EnemySpawned {
        /// Identifier assigned to the enemy by the registry.
        enemy: EnemyId,
        /// Category the enemy was instantiated from.
        category: EnemyCategory,
        /// Spawn location.
        position: Vec2,
    },
    /// Reports that an enemy survived a defender attack.
    EnemyDamaged {
        /// Enemy that was struck.
        enemy: EnemyId,
        /// Damage that landed.
        damage: u32,
        /// Health left after the blow.
        remaining: u32,
    },
    /// Reports that an enemy died and was removed from the registry.
    EnemyDefeated {
        /// Enemy that was removed.
        enemy: EnemyId,
        /// Category of the defeated enemy.
        category: EnemyCategory,
        /// Score credited for the kill.
        reward: u32,
        /// Upgrade points credited for the kill.
        upgrade_points: u32,
    },
    /// Reports contact damage taken by the defender.
    DefenderDamaged {
        /// Health removed.
        amount: u32,
        /// Health left afterwards.
        health: u32,
    },
    /// Reports a regeneration pulse.
    DefenderHealed {
        /// Health actually restored after clamping.
        amount: u32,
        /// Health afterwards.
        health: u32,
    },
    /// Announces that a new wave started.
    WaveAdvanced {
        /// Number of the wave that just started.
        wave: u32,
        /// Upgrade points granted for the completed wave.
        bonus_points: u32,
    },
    /// Confirms that a pickup was placed in the arena.
    PickupSpawned {
        /// Identifier assigned to the pickup.
        pickup: PickupId,
        /// Effect carried by the pickup.
        kind: PowerUpKind,
        /// Location of the pickup.
        position: Vec2,
    },
    /// Reports that an uncollected pickup was removed.
    PickupDespawned {
        /// Pickup that was removed.
        pickup: PickupId,
    },
    /// Reports that a collected pickup activated its effect.
    PowerUpActivated {
        /// Effect that is now active.
        kind: PowerUpKind,
        /// Absolute time at which the effect lapses.
        expires_at: Duration,
        /// Whether an already active effect had its expiry replaced.
        refreshed: bool,
    },
    /// Reports that an active effect lapsed.
    PowerUpExpired {
        /// Effect that was removed.
        kind: PowerUpKind,
    },
    /// Reports that a collection request was refused.
    CollectRejected {
        /// Pickup named by the request.
        pickup: PickupId,
        /// Reason the request failed.
        reason: CollectError,
    },
    /// Confirms a completed upgrade purchase.
    UpgradeApplied {
        /// Upgrade that was purchased.
        kind: UpgradeKind,
        /// Points spent.
        cost: u32,
        /// Points left afterwards.
        remaining_points: u32,
    },
    /// Reports that an upgrade purchase was refused.
    UpgradeRejected {
        /// Upgrade named by the request.
        kind: UpgradeKind,
        /// Reason the request failed.
        reason: UpgradeError,
    },
    /// Announces a status transition.
    StatusChanged {
        /// Status that became active.
        status: SimulationStatus,
    },
    /// Confirms that the world returned to session defaults.
    SessionReset,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a power-up pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Visible extent of the arena, anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaBounds {
    /// Horizontal extent measured in world units.
    pub width: f32,
    /// Vertical extent measured in world units.
    pub height: f32,
}

impl ArenaBounds {
    /// Creates arena bounds with explicit dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre of the arena, where the defender stands.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Enemy archetypes that can appear in a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyCategory {
    /// Common melee grunt.
    Basic,
    /// Fragile, quick scout.
    Fast,
    /// Slow, durable bruiser.
    Tank,
    /// Rare boss that only appears on every fifth wave.
    Boss,
}

impl EnemyCategory {
    /// Every category in ascending tier order.
    pub const ALL: [Self; 4] = [Self::Basic, Self::Fast, Self::Tank, Self::Boss];

    /// Returns the stock template describing the category at wave one.
    #[must_use]
    pub const fn template(self) -> CategoryTemplate {
        match self {
            Self::Basic => CategoryTemplate {
                category: self,
                base_health: 20,
                base_speed: 1.0,
                base_damage: 5,
                reward: 10,
                upgrade_points: 1,
                spawn_weight: 70.0,
                boss: false,
            },
            Self::Fast => CategoryTemplate {
                category: self,
                base_health: 15,
                base_speed: 2.0,
                base_damage: 3,
                reward: 15,
                upgrade_points: 1,
                spawn_weight: 20.0,
                boss: false,
            },
            Self::Tank => CategoryTemplate {
                category: self,
                base_health: 50,
                base_speed: 0.5,
                base_damage: 10,
                reward: 25,
                upgrade_points: 2,
                spawn_weight: 10.0,
                boss: false,
            },
            Self::Boss => CategoryTemplate {
                category: self,
                base_health: 100,
                base_speed: 0.8,
                base_damage: 15,
                reward: 50,
                upgrade_points: 5,
                spawn_weight: 1.0,
                boss: true,
            },
        }
    }
}

/// Unscaled statistics and spawn weight describing an enemy category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryTemplate {
    /// Category tag applied to instantiated enemies.
    pub category: EnemyCategory,
    /// Health at wave one.
    pub base_health: u32,
    /// Distance covered per tick at wave zero.
    pub base_speed: f32,
    /// Contact damage at wave one.
    pub base_damage: u32,
    /// Score granted on death at wave one.
    pub reward: u32,
    /// Upgrade points granted on death.
    pub upgrade_points: u32,
    /// Relative selection weight.
    pub spawn_weight: f32,
    /// Boss categories are only eligible on every fifth wave.
    pub boss: bool,
}

/// Wave-scaled statistics of an enemy that is about to enter the arena.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    /// Category the enemy was instantiated from.
    pub category: EnemyCategory,
    /// Starting and maximum health.
    pub health: u32,
    /// Distance covered per tick.
    pub speed: f32,
    /// Damage contributed while in contact with the defender.
    pub attack_damage: u32,
    /// Score granted on death.
    pub reward: u32,
    /// Upgrade points granted on death.
    pub upgrade_points: u32,
}

/// Defender statistics. Base values are permanent; effective values fold in
/// active power-ups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenderStats {
    /// Health ceiling.
    pub max_health: u32,
    /// Damage dealt per attack.
    pub attack: u32,
    /// Flat reduction applied to combined contact damage.
    pub defense: u32,
    /// Minimum time between two attacks, in milliseconds.
    pub attack_interval_ms: u32,
    /// Health restored per regeneration pulse.
    pub healing: u32,
}

impl DefenderStats {
    /// Minimum time between two attacks.
    #[must_use]
    pub fn attack_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.attack_interval_ms))
    }

    /// Folds the provided effects over these stats, in iteration order.
    #[must_use]
    pub fn with_effects<I>(self, effects: I) -> Self
    where
        I: IntoIterator<Item = PowerUpKind>,
    {
        effects
            .into_iter()
            .fold(self, |stats, effect| effect.apply(stats))
    }
}

impl Default for DefenderStats {
    fn default() -> Self {
        Self {
            max_health: 100,
            attack: 10,
            defense: 5,
            attack_interval_ms: 1_000,
            healing: 1,
        }
    }
}

/// Permanent upgrades that can be bought with upgrade points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Raises attack damage.
    Attack,
    /// Raises defense.
    Defense,
    /// Shortens the attack interval.
    AttackSpeed,
    /// Raises regeneration per pulse.
    Healing,
    /// Raises the health ceiling and current health alike.
    MaxHealth,
}

impl UpgradeKind {
    /// Every upgrade in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Attack,
        Self::Defense,
        Self::AttackSpeed,
        Self::Healing,
        Self::MaxHealth,
    ];

    /// Upgrade points required to purchase the upgrade.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Attack | Self::Defense => 1,
            Self::AttackSpeed | Self::MaxHealth => 2,
            Self::Healing => 3,
        }
    }

    /// Stat change granted by a single purchase.
    #[must_use]
    pub const fn delta(self) -> StatDelta {
        match self {
            Self::Attack => StatDelta::Attack(5),
            Self::Defense => StatDelta::Defense(5),
            Self::AttackSpeed => StatDelta::AttackInterval { reduction_ms: 100 },
            Self::Healing => StatDelta::Healing(1),
            Self::MaxHealth => StatDelta::MaxHealth(20),
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Attack => "Attack Power",
            Self::Defense => "Defense",
            Self::AttackSpeed => "Attack Speed",
            Self::Healing => "Regeneration",
            Self::MaxHealth => "Max Health",
        }
    }
}

/// Permanent change applied to base stats by an upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatDelta {
    /// Adds to attack damage.
    Attack(u32),
    /// Adds to defense.
    Defense(u32),
    /// Shortens the attack interval, never below [`MIN_ATTACK_INTERVAL_MS`].
    AttackInterval {
        /// Milliseconds removed from the interval.
        reduction_ms: u32,
    },
    /// Adds to regeneration per pulse.
    Healing(u32),
    /// Adds to the health ceiling.
    MaxHealth(u32),
}

impl StatDelta {
    /// Merges the delta into the provided base stats.
    #[must_use]
    pub fn apply(self, stats: DefenderStats) -> DefenderStats {
        match self {
            Self::Attack(amount) => DefenderStats {
                attack: stats.attack.saturating_add(amount),
                ..stats
            },
            Self::Defense(amount) => DefenderStats {
                defense: stats.defense.saturating_add(amount),
                ..stats
            },
            Self::AttackInterval { reduction_ms } => DefenderStats {
                attack_interval_ms: stats
                    .attack_interval_ms
                    .saturating_sub(reduction_ms)
                    .max(MIN_ATTACK_INTERVAL_MS),
                ..stats
            },
            Self::Healing(amount) => DefenderStats {
                healing: stats.healing.saturating_add(amount),
                ..stats
            },
            Self::MaxHealth(amount) => DefenderStats {
                max_health: stats.max_health.saturating_add(amount),
                ..stats
            },
        }
    }

    /// Current health granted alongside the delta.
    ///
    /// Raising the ceiling raises current health by the same amount.
    #[must_use]
    pub const fn health_bonus(self) -> u32 {
        match self {
            Self::MaxHealth(amount) => amount,
            _ => 0,
        }
    }
}

/// Temporary effects carried by pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Doubles attack damage.
    DamageBoost,
    /// Cuts the attack interval to thirty percent.
    RapidFire,
    /// Adds a flat defense bonus.
    Shield,
    /// Adds a flat regeneration bonus.
    Regeneration,
}

impl PowerUpKind {
    /// Every power-up kind.
    pub const ALL: [Self; 4] = [
        Self::DamageBoost,
        Self::RapidFire,
        Self::Shield,
        Self::Regeneration,
    ];

    /// Time an effect stays active after collection.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::DamageBoost => Duration::from_secs(10),
            Self::RapidFire => Duration::from_secs(8),
            Self::Shield => Duration::from_secs(15),
            Self::Regeneration => Duration::from_secs(12),
        }
    }

    /// Applies the effect transform to the provided stats.
    ///
    /// Transforms do not commute: doubling attack before or after another
    /// effect that adds attack yields different results.
    #[must_use]
    pub fn apply(self, stats: DefenderStats) -> DefenderStats {
        match self {
            Self::DamageBoost => DefenderStats {
                attack: stats.attack.saturating_mul(2),
                ..stats
            },
            Self::RapidFire => {
                let scaled = (stats.attack_interval_ms as f32 * 0.3).round() as u32;
                DefenderStats {
                    attack_interval_ms: scaled.max(MIN_ATTACK_INTERVAL_MS),
                    ..stats
                }
            }
            Self::Shield => DefenderStats {
                defense: stats.defense.saturating_add(20),
                ..stats
            },
            Self::Regeneration => DefenderStats {
                healing: stats.healing.saturating_add(5),
                ..stats
            },
        }
    }
}

/// Reasons an upgrade purchase may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum UpgradeError {
    /// Purchases are only accepted while the simulation is running.
    #[error("upgrades can only be purchased while the simulation is running")]
    NotRunning,
    /// The ledger holds fewer points than the upgrade costs.
    #[error("upgrade costs {required} points but only {available} are available")]
    InsufficientPoints {
        /// Cost of the upgrade.
        required: u32,
        /// Points held at the time of the request.
        available: u32,
    },
}

/// Reasons a pickup collection may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum CollectError {
    /// Collection is only accepted while the simulation is running.
    #[error("pickups can only be collected while the simulation is running")]
    NotRunning,
    /// No pending pickup carries the requested identifier.
    #[error("pickup {0:?} is not pending")]
    UnknownPickup(PickupId),
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Category the enemy was instantiated from.
    pub category: EnemyCategory,
    /// Current position.
    pub position: Vec2,
    /// Current health.
    pub health: u32,
    /// Health at creation.
    pub max_health: u32,
    /// Distance covered per tick.
    pub speed: f32,
    /// Contact damage.
    pub attack_damage: u32,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    ///
    /// Identifiers are assigned in spawn order, so sorting by id yields
    /// insertion order.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemy is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a pending pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSnapshot {
    /// Unique identifier assigned to the pickup.
    pub id: PickupId,
    /// Effect carried by the pickup.
    pub kind: PowerUpKind,
    /// Location of the pickup.
    pub position: Vec2,
    /// Creation timestamp.
    pub spawned_at: Duration,
}

/// Read-only snapshot describing all pending pickups.
#[derive(Clone, Debug, Default)]
pub struct PickupView {
    snapshots: Vec<PickupSnapshot>,
}

impl PickupView {
    /// Creates a new pickup view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PickupSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the pending pickups in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &PickupSnapshot> {
        self.snapshots.iter()
    }

    /// Number of pending pickups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no pickup is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Looks up a pending pickup by identifier.
    #[must_use]
    pub fn get(&self, pickup: PickupId) -> Option<&PickupSnapshot> {
        self.snapshots
            .binary_search_by_key(&pickup, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }
}

/// Active power-up effect and its absolute expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveEffect {
    /// Effect identity.
    pub kind: PowerUpKind,
    /// Absolute time at which the effect lapses.
    pub expires_at: Duration,
}

/// Read-only view of the defender.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderSnapshot {
    /// Fixed position at the arena centre.
    pub position: Vec2,
    /// Current health.
    pub health: u32,
    /// Permanent stats including purchased upgrades.
    pub base: DefenderStats,
    /// Base stats with every active effect folded in.
    pub effective: DefenderStats,
}

/// Score, wave and currency held by the economy ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EconomySnapshot {
    /// Accumulated score; never decreases within a session.
    pub score: u64,
    /// Current wave number, starting at one.
    pub wave: u32,
    /// Spendable upgrade points.
    pub upgrade_points: u32,
}

/// Spawn and kill counters for the current wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WaveProgress {
    /// Current wave number.
    pub wave: u32,
    /// Enemies spawned so far this wave.
    pub spawned: u32,
    /// Enemies killed so far this wave.
    pub killed: u32,
}

impl WaveProgress {
    /// Quota of enemies for the wave.
    #[must_use]
    pub const fn required(&self) -> u32 {
        enemies_required(self.wave)
    }

    /// Reports whether every enemy of the wave has been spawned.
    #[must_use]
    pub const fn spawning_exhausted(&self) -> bool {
        self.spawned >= self.required()
    }
}

/// Timestamps gating the time-based actions of the simulation.
///
/// `None` means the action never fired this session and is always ready.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timers {
    /// Time of the most recent defender attack.
    pub last_attack: Option<Duration>,
    /// Time of the most recent regeneration pulse.
    pub last_heal: Option<Duration>,
    /// Time of the most recent enemy spawn.
    pub last_spawn: Option<Duration>,
    /// Earliest time at which a pickup may spawn.
    pub next_pickup_at: Duration,
}

/// Reports whether `interval` has elapsed since `last` as of `now`.
#[must_use]
pub fn interval_elapsed(last: Option<Duration>, now: Duration, interval: Duration) -> bool {
    match last {
        None => true,
        Some(last) => now.saturating_sub(last) >= interval,
    }
}

/// Terminal statistics reported to the persistence collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Score at the end of the session.
    pub final_score: u64,
    /// Wave reached at the end of the session.
    pub final_wave: u32,
    /// Enemies defeated during the session.
    pub enemies_defeated: u32,
}
