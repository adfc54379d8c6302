#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement system that steers enemies straight at the defender.

use bastion_core::{Command, EnemyView, SimulationStatus, Vec2};

/// Pure system that proposes one pursuit step per live enemy and tick.
#[derive(Debug, Default)]
pub struct Movement {
    scratch: Vec<Command>,
}

impl Movement {
    /// Creates a new movement system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::MoveEnemy` for every enemy that is not already on the target.
    pub fn handle(
        &mut self,
        status: SimulationStatus,
        enemies: &EnemyView,
        target: Vec2,
        out: &mut Vec<Command>,
    ) {
        if !status.is_running() || enemies.is_empty() {
            return;
        }

        self.scratch.clear();
        for enemy in enemies.iter() {
            let to = step_toward(enemy.position, target, enemy.speed);
            if to != enemy.position {
                self.scratch.push(Command::MoveEnemy {
                    enemy: enemy.id,
                    to,
                });
            }
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

/// Moves `position` by `speed` along the unit vector pointing at `target`.
///
/// A zero-length displacement yields no movement. Steps are not clamped, so a
/// fast enemy may overshoot the target and turn around on the next tick.
#[must_use]
pub fn step_toward(position: Vec2, target: Vec2, speed: f32) -> Vec2 {
    position + (target - position).normalize_or_zero() * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_follows_unit_direction() {
        let next = step_toward(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), 2.0);
        assert!((next - Vec2::new(1.2, 1.6)).length() < 1e-5);
    }

    #[test]
    fn coincident_points_do_not_move() {
        let here = Vec2::new(400.0, 300.0);
        assert_eq!(step_toward(here, here, 5.0), here);
    }

    #[test]
    fn step_length_equals_speed() {
        let start = Vec2::new(-50.0, 120.0);
        let next = step_toward(start, Vec2::new(400.0, 300.0), 1.05);
        assert!(((next - start).length() - 1.05).abs() < 1e-5);
    }
}
