#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure combat system resolving defender attacks, enemy contact damage and
//! regeneration.
//!
//! Each phase reads effective defender stats and emits at most one command.
//! The scheduler applies a phase's commands before running the next phase, so
//! an enemy killed by the defender never deals contact damage in that tick.

use std::time::Duration;

use bastion_core::{
    interval_elapsed, Command, DefenderSnapshot, EnemySnapshot, EnemyView, SimulationStatus,
    Timers,
};
use serde::Deserialize;

/// Distances and cadences used by the combat phases.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reach of the defender's attack.
    pub attack_range: f32,
    /// Distance at which an enemy deals contact damage.
    pub contact_radius: f32,
    /// Time between two regeneration pulses.
    pub regen_interval_ms: u64,
}

impl Config {
    fn regen_interval(&self) -> Duration {
        Duration::from_millis(self.regen_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attack_range: 100.0,
            contact_radius: 30.0,
            regen_interval_ms: 1_000,
        }
    }
}

/// Combat system that queues strike, damage and heal commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Combat {
    config: Config,
}

impl Combat {
    /// Creates a new combat system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Emits `Command::StrikeEnemy` against the first enemy in range once the
    /// attack interval has elapsed.
    ///
    /// Without a target the cooldown is left untouched, so the defender strikes
    /// the moment an enemy steps into range after idling.
    pub fn resolve_player_attack(
        &self,
        now: Duration,
        status: SimulationStatus,
        defender: &DefenderSnapshot,
        timers: &Timers,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if !status.is_running() {
            return;
        }

        let stats = defender.effective;
        if !interval_elapsed(timers.last_attack, now, stats.attack_interval()) {
            return;
        }

        let Some(target) = enemies
            .iter()
            .find(|enemy| self.within(enemy, defender, self.config.attack_range))
        else {
            return;
        };

        out.push(Command::StrikeEnemy {
            enemy: target.id,
            damage: stats.attack.max(1),
            at: now,
        });
    }

    /// Emits one `Command::DamageDefender` combining every enemy in contact.
    ///
    /// The combined damage is reduced by effective defense but never below one.
    pub fn resolve_enemy_attacks(
        &self,
        status: SimulationStatus,
        defender: &DefenderSnapshot,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if !status.is_running() {
            return;
        }

        let mut contact = false;
        let mut total: u32 = 0;
        for enemy in enemies
            .iter()
            .filter(|enemy| self.within(enemy, defender, self.config.contact_radius))
        {
            contact = true;
            total = total.saturating_add(enemy.attack_damage);
        }

        if !contact {
            return;
        }

        out.push(Command::DamageDefender {
            amount: total.saturating_sub(defender.effective.defense).max(1),
        });
    }

    /// Emits `Command::HealDefender` once per regeneration interval.
    ///
    /// A fallen defender does not regenerate.
    pub fn resolve_regeneration(
        &self,
        now: Duration,
        status: SimulationStatus,
        defender: &DefenderSnapshot,
        timers: &Timers,
        out: &mut Vec<Command>,
    ) {
        if !status.is_running() || defender.health == 0 {
            return;
        }

        if !interval_elapsed(timers.last_heal, now, self.config.regen_interval()) {
            return;
        }

        out.push(Command::HealDefender {
            amount: defender.effective.healing,
            at: now,
        });
    }

    fn within(&self, enemy: &EnemySnapshot, defender: &DefenderSnapshot, radius: f32) -> bool {
        enemy.position.distance(defender.position) <= radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::{DefenderStats, EnemyCategory, EnemyId, Vec2};

    fn defender(effective: DefenderStats) -> DefenderSnapshot {
        DefenderSnapshot {
            position: Vec2::new(400.0, 300.0),
            health: 50,
            base: DefenderStats::default(),
            effective,
        }
    }

    fn enemy(id: u32, x: f32, attack_damage: u32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            category: EnemyCategory::Basic,
            position: Vec2::new(x, 300.0),
            health: 20,
            max_health: 20,
            speed: 1.0,
            attack_damage,
        }
    }

    #[test]
    fn strikes_first_enemy_in_range_by_id() {
        let combat = Combat::default();
        let enemies = EnemyView::from_snapshots(vec![
            enemy(3, 320.0, 5),
            enemy(2, 350.0, 5),
            enemy(1, 200.0, 5),
        ]);
        let mut out = Vec::new();

        combat.resolve_player_attack(
            Duration::from_secs(1),
            SimulationStatus::Running,
            &defender(DefenderStats::default()),
            &Timers::default(),
            &enemies,
            &mut out,
        );

        assert_eq!(
            out,
            vec![Command::StrikeEnemy {
                enemy: EnemyId::new(2),
                damage: 10,
                at: Duration::from_secs(1),
            }]
        );
    }

    #[test]
    fn zero_attack_still_deals_one_damage() {
        let combat = Combat::default();
        let stats = DefenderStats {
            attack: 0,
            ..DefenderStats::default()
        };
        let enemies = EnemyView::from_snapshots(vec![enemy(1, 390.0, 5)]);
        let mut out = Vec::new();

        combat.resolve_player_attack(
            Duration::ZERO,
            SimulationStatus::Running,
            &defender(stats),
            &Timers::default(),
            &enemies,
            &mut out,
        );

        assert!(matches!(
            out.as_slice(),
            [Command::StrikeEnemy { damage: 1, .. }]
        ));
    }

    #[test]
    fn cooling_down_defender_holds_fire() {
        let combat = Combat::default();
        let timers = Timers {
            last_attack: Some(Duration::from_millis(500)),
            ..Timers::default()
        };
        let enemies = EnemyView::from_snapshots(vec![enemy(1, 390.0, 5)]);
        let mut out = Vec::new();

        combat.resolve_player_attack(
            Duration::from_millis(1_400),
            SimulationStatus::Running,
            &defender(DefenderStats::default()),
            &timers,
            &enemies,
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn contact_damage_is_summed_then_reduced_by_defense() {
        let combat = Combat::default();
        let enemies = EnemyView::from_snapshots(vec![
            enemy(1, 380.0, 5),
            enemy(2, 420.0, 10),
            enemy(3, 300.0, 50),
        ]);
        let mut out = Vec::new();

        combat.resolve_enemy_attacks(
            SimulationStatus::Running,
            &defender(DefenderStats::default()),
            &enemies,
            &mut out,
        );

        assert_eq!(out, vec![Command::DamageDefender { amount: 10 }]);
    }

    #[test]
    fn contact_damage_floors_at_one() {
        let combat = Combat::default();
        let stats = DefenderStats {
            defense: 40,
            ..DefenderStats::default()
        };
        let enemies = EnemyView::from_snapshots(vec![enemy(1, 400.0, 5)]);
        let mut out = Vec::new();

        combat.resolve_enemy_attacks(
            SimulationStatus::Running,
            &defender(stats),
            &enemies,
            &mut out,
        );

        assert_eq!(out, vec![Command::DamageDefender { amount: 1 }]);
    }

    #[test]
    fn no_contact_means_no_damage() {
        let combat = Combat::default();
        let enemies = EnemyView::from_snapshots(vec![enemy(1, 100.0, 5)]);
        let mut out = Vec::new();

        combat.resolve_enemy_attacks(
            SimulationStatus::Running,
            &defender(DefenderStats::default()),
            &enemies,
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn regeneration_is_gated_by_interval() {
        let combat = Combat::default();
        let stats = DefenderStats {
            healing: 6,
            ..DefenderStats::default()
        };
        let timers = Timers {
            last_heal: Some(Duration::from_millis(2_000)),
            ..Timers::default()
        };
        let mut out = Vec::new();

        combat.resolve_regeneration(
            Duration::from_millis(2_999),
            SimulationStatus::Running,
            &defender(stats),
            &timers,
            &mut out,
        );
        assert!(out.is_empty());

        combat.resolve_regeneration(
            Duration::from_millis(3_000),
            SimulationStatus::Running,
            &defender(stats),
            &timers,
            &mut out,
        );
        assert_eq!(
            out,
            vec![Command::HealDefender {
                amount: 6,
                at: Duration::from_millis(3_000),
            }]
        );
    }
}
