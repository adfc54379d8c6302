use std::time::Duration;

use bastion_core::{Command, EnemyCategory, EnemyProfile, SimulationStatus, Vec2};
use bastion_system_movement::Movement;
use bastion_world::{self as world, query, World};

fn spawn(world: &mut World, position: Vec2, speed: f32) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SpawnEnemy {
            profile: EnemyProfile {
                category: EnemyCategory::Basic,
                health: 20,
                speed,
                attack_damage: 5,
                reward: 10,
                upgrade_points: 1,
            },
            position,
            at: Duration::ZERO,
        },
        &mut events,
    );
}

fn pump(world: &mut World, movement: &mut Movement) -> Vec<Command> {
    let enemies = query::enemy_view(world);
    let target = query::defender(world).position;
    let mut commands = Vec::new();
    movement.handle(query::status(world), &enemies, target, &mut commands);

    let mut events = Vec::new();
    for command in commands.iter().cloned() {
        world::apply(world, command, &mut events);
    }
    commands
}

#[test]
fn enemies_close_distance_every_tick() {
    let mut world = World::new();
    spawn(&mut world, Vec2::new(-50.0, 300.0), 2.0);
    spawn(&mut world, Vec2::new(400.0, 650.0), 1.0);
    let mut movement = Movement::new();

    let defender = query::defender(&world).position;
    let before: Vec<f32> = query::enemy_view(&world)
        .iter()
        .map(|enemy| enemy.position.distance(defender))
        .collect();

    let commands = pump(&mut world, &mut movement);
    assert_eq!(commands.len(), 2);

    let after: Vec<f32> = query::enemy_view(&world)
        .iter()
        .map(|enemy| enemy.position.distance(defender))
        .collect();
    assert!((before[0] - after[0] - 2.0).abs() < 1e-4);
    assert!((before[1] - after[1] - 1.0).abs() < 1e-4);
}

#[test]
fn enemy_on_defender_stays_put() {
    let mut world = World::new();
    spawn(&mut world, Vec2::new(400.0, 300.0), 1.0);
    let mut movement = Movement::new();

    assert!(pump(&mut world, &mut movement).is_empty());
}

#[test]
fn paused_sessions_do_not_move_enemies() {
    let mut world = World::new();
    spawn(&mut world, Vec2::new(0.0, 0.0), 1.0);
    let mut events = Vec::new();
    world::apply(&mut world, Command::Pause, &mut events);
    assert_eq!(query::status(&world), SimulationStatus::Paused);

    let mut movement = Movement::new();
    assert!(pump(&mut world, &mut movement).is_empty());
}
