//! Configuration loading and typed config structures for the runner.
//!
//! The canonical configuration lives in `ultimatum-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, with per-field defaults, and a loader that reads
//! and validates the file. Structural tournament validation (population
//! bounds, kill counts) happens later, at tournament construction.

use std::path::Path;

use serde::Deserialize;

use ultimatum_agents::{StrategyError, StrategySpec};
use ultimatum_engine::TournamentConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A strategy parameter is outside its valid range.
    #[error("invalid strategy parameters: {source}")]
    Strategy {
        /// The underlying validation error.
        #[from]
        source: StrategyError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level run configuration. Mirrors `ultimatum-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Run identity and seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// Population size and strategy mix.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Tournament schedule parameters.
    #[serde(default)]
    pub tournament: TournamentSection,

    /// Results-file settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RunConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Strategy`] if strategy parameters are invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] on malformed YAML or
    /// [`ConfigError::Strategy`] on invalid strategy parameters.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.population.strategy.validate()?;
        Ok(config)
    }
}

/// Run identity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable run name (results metadata only).
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
        }
    }
}

/// Population configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PopulationConfig {
    /// Number of agents (odd values are rounded up at construction).
    #[serde(default = "default_population_size")]
    pub size: usize,

    /// How each agent's strategy is built.
    #[serde(default = "default_strategy")]
    pub strategy: StrategySpec,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            strategy: default_strategy(),
        }
    }
}

/// Tournament schedule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TournamentSection {
    /// Number of generations to run.
    #[serde(default = "default_generations")]
    pub generations: u64,

    /// Rounds played before each selection step.
    #[serde(default = "default_rounds_per_generation")]
    pub rounds_per_generation: u32,

    /// Game iterations per pairing (each plays both role orders).
    #[serde(default = "default_iterations_per_pairing")]
    pub iterations_per_pairing: u32,

    /// How many of the poorest agents selection replaces.
    #[serde(default = "default_kills_per_generation")]
    pub kills_per_generation: usize,

    /// Shuffle agent indices before pairing each round.
    #[serde(default = "default_true")]
    pub randomize_pairing: bool,
}

impl TournamentSection {
    /// Assemble the engine-side configuration for the given population.
    pub const fn engine_config(&self, population_size: usize) -> TournamentConfig {
        TournamentConfig {
            population_size,
            rounds_per_generation: self.rounds_per_generation,
            iterations_per_pairing: self.iterations_per_pairing,
            kills_per_generation: self.kills_per_generation,
            randomize_pairing: self.randomize_pairing,
        }
    }
}

impl Default for TournamentSection {
    fn default() -> Self {
        Self {
            generations: default_generations(),
            rounds_per_generation: default_rounds_per_generation(),
            iterations_per_pairing: default_iterations_per_pairing(),
            kills_per_generation: default_kills_per_generation(),
            randomize_pairing: true,
        }
    }
}

/// Results-file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Where the JSON results file is written.
    #[serde(default = "default_results_path")]
    pub results_path: String,

    /// Pretty-print the JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: default_results_path(),
            pretty: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---- Defaults ----

fn default_world_name() -> String {
    "ultimatum".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_population_size() -> usize {
    50
}

const fn default_strategy() -> StrategySpec {
    StrategySpec::FixedRandom
}

const fn default_generations() -> u64 {
    100
}

const fn default_rounds_per_generation() -> u32 {
    10
}

const fn default_iterations_per_pairing() -> u32 {
    1
}

const fn default_kills_per_generation() -> usize {
    1
}

const fn default_true() -> bool {
    true
}

fn default_results_path() -> String {
    "ultimatum-results.json".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_all_defaults() {
        let config = RunConfig::parse("{}").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.population.size, 50);
        assert_eq!(config.population.strategy, StrategySpec::FixedRandom);
        assert_eq!(config.tournament.generations, 100);
        assert!(config.tournament.randomize_pairing);
        assert_eq!(config.output.results_path, "ultimatum-results.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn full_yaml_round_trips_into_typed_sections() {
        let yaml = r"
world:
  name: pilot-run
  seed: 7
population:
  size: 30
  strategy:
    type: adaptive
    init_range: 0.05
    mutation_rate: 0.2
tournament:
  generations: 500
  rounds_per_generation: 20
  iterations_per_pairing: 2
  kills_per_generation: 3
  randomize_pairing: false
output:
  results_path: out/run7.json
  pretty: false
logging:
  level: debug
";
        let config = RunConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "pilot-run");
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.population.size, 30);
        assert_eq!(
            config.population.strategy,
            StrategySpec::Adaptive {
                init_range: 0.05,
                mutation_rate: 0.2,
            }
        );
        assert_eq!(config.tournament.generations, 500);
        assert!(!config.tournament.randomize_pairing);
        assert_eq!(config.output.results_path, "out/run7.json");
        assert!(!config.output.pretty);
        assert_eq!(config.logging.level, "debug");

        let engine = config.tournament.engine_config(config.population.size);
        assert_eq!(engine.population_size, 30);
        assert_eq!(engine.rounds_per_generation, 20);
        assert_eq!(engine.kills_per_generation, 3);
    }

    #[test]
    fn invalid_strategy_parameters_are_rejected_at_parse() {
        let yaml = r"
population:
  strategy:
    type: fixed
    offer: 1.5
";
        assert!(matches!(
            RunConfig::parse(yaml),
            Err(ConfigError::Strategy { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        assert!(matches!(
            RunConfig::parse("world: ["),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
