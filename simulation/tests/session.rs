use std::time::Duration;

use bastion_core::{
    CollectError, EnemyCategory, Event, PickupId, SimulationStatus, UpgradeError, UpgradeKind,
};
use bastion_simulation::{ConfigError, Simulation, SimulationConfig};
use bastion_system_roster::RosterError;

const TICK: Duration = Duration::from_millis(16);
const TICK_LIMIT: u32 = 20_000;

fn sharpshooter_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.spawning.categories = vec![EnemyCategory::Basic];
    config.world.defender.attack = 25;
    config.world.defender.attack_interval_ms = 250;
    config
}

fn run_until<F>(simulation: &mut Simulation, mut done: F) -> Duration
where
    F: FnMut(&Simulation) -> bool,
{
    let mut now = Duration::ZERO;
    for _ in 0..TICK_LIMIT {
        simulation.tick(now);
        if done(simulation) {
            return now;
        }
        now += TICK;
    }
    panic!("condition not reached within {TICK_LIMIT} ticks");
}

#[test]
fn clearing_first_wave_grants_rewards_and_bonus() {
    let mut simulation = Simulation::new(sharpshooter_config()).expect("config");

    let initial = simulation.snapshot();
    assert_eq!(initial.economy.wave, 1);
    assert_eq!(initial.defender.health, 100);
    assert_eq!(initial.economy.score, 0);
    assert_eq!(initial.economy.upgrade_points, 3);

    let _ = run_until(&mut simulation, |simulation| {
        simulation.snapshot().economy.wave == 2
    });

    let snapshot = simulation.snapshot();
    assert_eq!(snapshot.status, SimulationStatus::Running);
    assert_eq!(snapshot.economy.upgrade_points, 10);
    assert_eq!(snapshot.economy.score, 50);
    assert_eq!(snapshot.wave.spawned, 0);
    assert!(snapshot.enemies.is_empty());
    assert!(simulation.events().contains(&Event::WaveAdvanced {
        wave: 2,
        bonus_points: 2,
    }));
    assert_eq!(simulation.session_summary().enemies_defeated, 5);
}

#[test]
fn paused_session_ignores_ticks_until_resumed() {
    let mut simulation = Simulation::new(SimulationConfig::default()).expect("config");
    simulation.tick(Duration::ZERO);
    simulation.pause();
    assert_eq!(simulation.status(), SimulationStatus::Paused);

    let frozen = simulation.snapshot();
    for step in 1..200 {
        simulation.tick(TICK * step);
    }
    assert_eq!(simulation.snapshot(), frozen);
    assert!(simulation.events().is_empty());

    simulation.resume();
    simulation.tick(TICK * 200);
    assert_eq!(simulation.status(), SimulationStatus::Running);
    assert_ne!(simulation.snapshot().enemies, frozen.enemies);
}

#[test]
fn reset_replays_a_fresh_session() {
    let mut reset = Simulation::new(sharpshooter_config()).expect("config");
    let _ = run_until(&mut reset, |simulation| {
        simulation.snapshot().economy.wave == 2
    });
    reset.reset();

    let restored = reset.snapshot();
    assert_eq!(restored.status, SimulationStatus::Running);
    assert_eq!(restored.economy.wave, 1);
    assert_eq!(restored.economy.score, 0);
    assert_eq!(restored.economy.upgrade_points, 3);
    assert_eq!(restored.defender.health, 100);
    assert!(restored.enemies.is_empty());
    assert!(restored.pickups.is_empty());
    assert!(restored.active_effects.is_empty());

    let mut fresh = Simulation::new(sharpshooter_config()).expect("config");
    for step in 0..600 {
        reset.tick(TICK * step);
        fresh.tick(TICK * step);
    }
    assert_eq!(reset.snapshot(), fresh.snapshot());
}

#[test]
fn upgrades_are_rejected_without_points_or_while_paused() {
    let mut simulation = Simulation::new(SimulationConfig::default()).expect("config");

    let receipt = simulation
        .apply_upgrade(UpgradeKind::MaxHealth)
        .expect("affordable");
    assert_eq!(receipt.remaining_points, 1);
    assert_eq!(receipt.base.max_health, 120);
    assert_eq!(receipt.health, 120);

    assert_eq!(
        simulation.apply_upgrade(UpgradeKind::Healing),
        Err(UpgradeError::InsufficientPoints {
            required: 3,
            available: 1,
        })
    );
    assert!(simulation.events().contains(&Event::UpgradeRejected {
        kind: UpgradeKind::Healing,
        reason: UpgradeError::InsufficientPoints {
            required: 3,
            available: 1,
        },
    }));

    simulation.pause();
    assert_eq!(
        simulation.apply_upgrade(UpgradeKind::Attack),
        Err(UpgradeError::NotRunning)
    );
    assert_eq!(simulation.snapshot().economy.upgrade_points, 1);
}

#[test]
fn pickups_can_be_collected_once() {
    let mut config = SimulationConfig::default();
    config.power_ups.spawn_chance = 1.0;
    let mut simulation = Simulation::new(config).expect("config");
    simulation.tick(Duration::ZERO);

    let pickup = simulation.snapshot().pickups[0];
    let stats = simulation
        .collect_power_up(pickup.id, Duration::ZERO)
        .expect("pending pickup");
    assert_eq!(stats, simulation.snapshot().defender.effective);
    assert_eq!(simulation.snapshot().active_effects.len(), 1);

    assert_eq!(
        simulation.collect_power_up(pickup.id, Duration::ZERO),
        Err(CollectError::UnknownPickup(pickup.id))
    );

    simulation.pause();
    assert_eq!(
        simulation.collect_power_up(PickupId::new(99), Duration::ZERO),
        Err(CollectError::NotRunning)
    );
}

#[test]
fn defenceless_defender_ends_the_session() {
    let mut config = SimulationConfig::default();
    config.combat.attack_range = -1.0;
    config.world.defender.defense = 0;
    let mut simulation = Simulation::new(config).expect("config");

    let _ = run_until(&mut simulation, |simulation| {
        simulation.status() == SimulationStatus::Over
    });

    assert_eq!(simulation.snapshot().defender.health, 0);
    assert!(simulation.events().contains(&Event::StatusChanged {
        status: SimulationStatus::Over,
    }));

    let over = simulation.snapshot();
    simulation.pause();
    simulation.resume();
    simulation.tick(over.now + TICK);
    assert_eq!(simulation.status(), SimulationStatus::Over);
    assert_eq!(simulation.snapshot(), over);

    let summary = simulation.session_summary();
    assert_eq!(summary.final_wave, 1);
    assert_eq!(summary.final_score, 0);
    assert_eq!(summary.enemies_defeated, 0);
}

#[test]
fn roster_without_regular_category_is_refused() {
    let config = SimulationConfig::from_toml_str("[spawning]\ncategories = [\"boss\"]")
        .expect("well-formed document");
    assert!(matches!(
        Simulation::new(config),
        Err(ConfigError::Roster(RosterError::NoRegularCategory))
    ));
}

#[test]
fn boss_in_roster_waits_for_boss_wave() {
    let config = SimulationConfig::from_toml_str("[spawning]\ncategories = [\"boss\", \"basic\"]")
        .expect("well-formed document");
    let mut simulation = Simulation::new(config).expect("config");

    let mut now = Duration::ZERO;
    let mut spawned = 0;
    while spawned < 5 && simulation.status().is_running() {
        simulation.tick(now);
        for event in simulation.events() {
            if let Event::EnemySpawned { category, .. } = event {
                assert_eq!(*category, EnemyCategory::Basic, "spawned on wave 1");
                spawned += 1;
            }
        }
        now += TICK;
    }
    assert_eq!(spawned, 5);
}
