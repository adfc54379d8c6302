//! Scripted stand-in for a player in headless runs.

use std::time::Duration;

use bastion_core::UpgradeKind;
use bastion_simulation::Simulation;
use clap::ValueEnum;
use log::debug;

/// Purchase rotation used by [`Policy::Auto`].
const UPGRADE_ROTATION: [UpgradeKind; 5] = [
    UpgradeKind::Attack,
    UpgradeKind::AttackSpeed,
    UpgradeKind::Defense,
    UpgradeKind::MaxHealth,
    UpgradeKind::Healing,
];

/// How the headless runner plays between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Policy {
    /// Never spend points or collect pickups.
    Idle,
    /// Collect every pickup and buy upgrades in a fixed rotation.
    Auto,
}

/// Applies a [`Policy`] to a running simulation.
#[derive(Debug)]
pub(crate) struct Autopilot {
    policy: Policy,
    next_upgrade: usize,
}

impl Autopilot {
    pub(crate) fn new(policy: Policy) -> Self {
        Self {
            policy,
            next_upgrade: 0,
        }
    }

    /// Acts on the state left by the tick at `now`.
    pub(crate) fn act(&mut self, simulation: &mut Simulation, now: Duration) {
        if self.policy == Policy::Idle || !simulation.status().is_running() {
            return;
        }

        let pending: Vec<_> = simulation
            .snapshot()
            .pickups
            .iter()
            .map(|pickup| pickup.id)
            .collect();
        for pickup in pending {
            match simulation.collect_power_up(pickup, now) {
                Ok(stats) => debug!(
                    "collected pickup {}, attack now {}",
                    pickup.get(),
                    stats.attack
                ),
                Err(reason) => {
                    debug!("pickup {} not collected: {reason}", pickup.get());
                    break;
                }
            }
        }

        loop {
            let kind = UPGRADE_ROTATION[self.next_upgrade % UPGRADE_ROTATION.len()];
            if simulation.snapshot().economy.upgrade_points < kind.cost() {
                break;
            }
            if simulation.apply_upgrade(kind).is_err() {
                break;
            }
            self.next_upgrade = self.next_upgrade.wrapping_add(1);
        }
    }
}
