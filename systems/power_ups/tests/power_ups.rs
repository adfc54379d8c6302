use std::time::Duration;

use bastion_core::{Command, DefenderStats, Event, PowerUpKind};
use bastion_system_power_ups::{Config, PowerUps};
use bastion_world::{self as world, query, World};

fn pump(world: &mut World, engine: &mut PowerUps, now: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { now }, &mut events);

    let mut commands = Vec::new();
    engine.handle(
        now,
        query::status(world),
        &query::active_effects(world),
        &query::pickup_view(world),
        &query::timers(world),
        query::bounds(world),
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn collect_all(world: &mut World, engine: &PowerUps, now: Duration) {
    let pending: Vec<_> = query::pickup_view(world).iter().map(|p| p.id).collect();
    let mut events = Vec::new();
    for pickup in pending {
        let command = engine
            .collect(query::status(world), &query::pickup_view(world), pickup, now)
            .expect("pending pickup");
        world::apply(world, command, &mut events);
    }
}

#[test]
fn collected_effects_expire_back_to_base_stats() {
    let mut world = World::new();
    let config = Config {
        spawn_chance: 1.0,
        ..Config::default()
    };
    let mut engine = PowerUps::new(config, 0x00c0_ffee);

    let events = pump(&mut world, &mut engine, Duration::ZERO);
    let kind = events
        .iter()
        .find_map(|event| match event {
            Event::PickupSpawned { kind, .. } => Some(*kind),
            _ => None,
        })
        .expect("certain spawn");

    collect_all(&mut world, &engine, Duration::from_secs(1));
    assert_eq!(
        query::effective_stats(&world),
        kind.apply(DefenderStats::default())
    );
    assert!(query::pickup_view(&world).is_empty());

    let expiry = Duration::from_secs(1) + kind.duration();
    let events = pump(&mut world, &mut engine, expiry);
    assert!(events.contains(&Event::PowerUpExpired { kind }));
    assert_eq!(query::effective_stats(&world), DefenderStats::default());
}

#[test]
fn pickups_spawn_no_faster_than_cooldown() {
    let mut world = World::new();
    let config = Config {
        spawn_chance: 1.0,
        pickup_lifetime_ms: 0,
        max_pending: 100,
        ..Config::default()
    };
    let mut engine = PowerUps::new(config, 17);

    let mut spawns = Vec::new();
    for second in 0..=60 {
        let now = Duration::from_secs(second);
        for event in pump(&mut world, &mut engine, now) {
            if matches!(event, Event::PickupSpawned { .. }) {
                spawns.push(now);
            }
        }
    }

    assert!(spawns.len() >= 3, "{spawns:?}");
    for pair in spawns.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_secs(15), "{spawns:?}");
    }
}

#[test]
fn repeated_kind_refreshes_single_effect() {
    let mut world = World::new();
    let mut events = Vec::new();
    for at in [0, 1] {
        world::apply(
            &mut world,
            Command::SpawnPickup {
                kind: PowerUpKind::DamageBoost,
                position: bastion_core::Vec2::new(200.0, 200.0),
                at: Duration::from_secs(at),
                next_spawn_at: Duration::from_secs(at),
            },
            &mut events,
        );
    }
    let engine = PowerUps::new(Config::default(), 1);

    collect_all(&mut world, &engine, Duration::from_secs(2));

    let effects = query::active_effects(&world);
    assert_eq!(effects.len(), 1);
    assert_eq!(query::effective_stats(&world).attack, 20);
}
