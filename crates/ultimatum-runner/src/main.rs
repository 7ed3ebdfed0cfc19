//! Tournament runner entry point for the Ultimatum simulation.
//!
//! The runner wires configuration to the engine: it loads
//! `ultimatum-config.yaml` (or the path given as the first argument),
//! seeds the run's RNG, builds the population through the configured
//! strategy factory, drives the generation loop, and writes the JSON
//! results file.
//!
//! # Flow
//!
//! ```text
//! config.yaml --> factory --> Tournament::run --> results.json
//! ```
//!
//! Every run is reproducible from `world.seed`; the only other input
//! is the configuration file itself.

mod config;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ultimatum_engine::{StatsRecorder, Tournament};
use ultimatum_types::RunId;

use crate::config::RunConfig;
use crate::output::{ResultsFile, RunMetadata};

/// Application entry point.
///
/// Loads configuration, initializes logging, runs the tournament, and
/// writes the results file.
///
/// # Errors
///
/// Returns an error if the configuration is missing or invalid, the
/// tournament parameters fail validation, or the results file cannot
/// be written.
fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("ultimatum-config.yaml"), PathBuf::from);

    let config = RunConfig::from_file(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    // Initialize structured logging; RUST_LOG overrides the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    let run_id = RunId::new();
    let started_at = Utc::now();
    info!(
        run_id = %run_id,
        name = config.world.name,
        seed = config.world.seed,
        config = %config_path.display(),
        "ultimatum-runner starting"
    );

    let mut factory = config.population.strategy;
    let rng = SmallRng::seed_from_u64(config.world.seed);
    let mut tournament = Tournament::new(
        config.tournament.engine_config(config.population.size),
        &mut factory,
        rng,
    )
    .context("invalid tournament configuration")?;

    info!(
        population = tournament.agents().len(),
        generations = config.tournament.generations,
        "tournament initialized, entering generation loop"
    );

    let mut recorder = StatsRecorder::new();
    let generations = tournament.run(config.tournament.generations, &mut recorder);

    let results = ResultsFile {
        metadata: RunMetadata {
            run_id,
            name: config.world.name,
            seed: config.world.seed,
            started_at,
            finished_at: Utc::now(),
            generations: config.tournament.generations,
        },
        rounds: recorder.into_rounds(),
        generations,
        final_population: tournament.population_snapshot(),
    };

    let results_path = PathBuf::from(&config.output.results_path);
    results
        .write(&results_path, config.output.pretty)
        .with_context(|| format!("writing results to {}", results_path.display()))?;

    info!(path = %results_path.display(), "results written, run complete");
    Ok(())
}
