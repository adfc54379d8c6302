#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Bastion session.

mod policy;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use bastion_core::SimulationStatus;
use bastion_persistence::CareerStore;
use bastion_simulation::{Simulation, SimulationConfig};
use clap::Parser;
use log::{info, warn};

use crate::policy::{Autopilot, Policy};

/// Runs a seeded Bastion session without a display.
#[derive(Debug, Parser)]
#[command(name = "bastion", version, about)]
struct Args {
    /// TOML file overriding the session defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed overriding the configured one.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated seconds to run before stopping.
    #[arg(long, default_value_t = 300)]
    duration_secs: u64,
    /// Simulated milliseconds between ticks.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    /// How the runner plays between ticks.
    #[arg(long, value_enum, default_value_t = Policy::Auto)]
    policy: Policy,
    /// JSON file accumulating career statistics.
    #[arg(long, value_name = "PATH")]
    career: Option<PathBuf>,
    /// Erase the career file before running.
    #[arg(long, requires = "career")]
    reset_career: bool,
}

/// Entry point for the Bastion command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut simulation = Simulation::new(config).context("failed to start simulation")?;
    println!(
        "bastion: seed {:#x}, policy {:?}, up to {}s",
        simulation.config().seed,
        args.policy,
        args.duration_secs
    );

    let store = args.career.as_ref().map(CareerStore::new);
    if let Some(store) = store.as_ref().filter(|_| args.reset_career) {
        store
            .clear()
            .with_context(|| format!("failed to reset career file {:?}", store.path()))?;
        info!("career file {:?} cleared", store.path());
    }

    let tick = Duration::from_millis(args.tick_ms);
    let limit = Duration::from_secs(args.duration_secs);
    let mut autopilot = Autopilot::new(args.policy);
    let mut now = Duration::ZERO;
    while now <= limit && simulation.status() != SimulationStatus::Over {
        simulation.tick(now);
        autopilot.act(&mut simulation, now);
        now += tick;
    }

    let summary = simulation.session_summary();
    let snapshot = simulation.snapshot();
    println!(
        "{:?} after {:.1}s: wave {}, score {}, {} enemies defeated, health {}/{}",
        snapshot.status,
        snapshot.now.as_secs_f32(),
        summary.final_wave,
        summary.final_score,
        summary.enemies_defeated,
        snapshot.defender.health,
        snapshot.defender.effective.max_health,
    );

    if let Some(store) = store {
        match store.record_session(&summary) {
            Ok((record, unlocked)) => {
                println!(
                    "career: best score {}, best wave {}, {} games",
                    record.high_score, record.highest_wave, record.total_games_played
                );
                for achievement in unlocked {
                    println!("achievement unlocked: {}", achievement.title());
                }
            }
            Err(error) => warn!("career statistics were not saved: {error}"),
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {path:?}"))?;
            SimulationConfig::from_toml_str(&contents)
                .with_context(|| format!("failed to load config file {path:?}"))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}
