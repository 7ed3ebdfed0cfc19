//! The JSON results file written at the end of a run.
//!
//! One run produces one self-contained document: run metadata (id,
//! name, seed, timestamps), the per-round metric time series, the
//! per-generation summaries, and the final population snapshot with
//! the surviving adaptive genotypes. Downstream analysis and plotting
//! read this file; nothing reads the tournament in memory.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use ultimatum_types::{GenerationStats, PopulationSnapshot, RoundStats, RunId};

/// Errors that can occur when writing the results file.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Failed to write the results file to disk.
    #[error("failed to write results file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to serialize the results document.
    #[error("failed to serialize results: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Identity and provenance of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    /// Unique identifier for this run.
    pub run_id: RunId,
    /// Human-readable run name from the config.
    pub name: String,
    /// The seed the whole run derived from.
    pub seed: u64,
    /// When the run started (UTC).
    pub started_at: DateTime<Utc>,
    /// When the run finished (UTC).
    pub finished_at: DateTime<Utc>,
    /// Number of generations played.
    pub generations: u64,
}

/// The complete results document for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsFile {
    /// Run identity and provenance.
    pub metadata: RunMetadata,
    /// Per-round aggregates, in play order across all generations.
    pub rounds: Vec<RoundStats>,
    /// Per-generation summaries, in order.
    pub generations: Vec<GenerationStats>,
    /// The population at the end of the run, genotypes included.
    pub final_population: PopulationSnapshot,
}

impl ResultsFile {
    /// Serialize and write the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if serialization or the write fails.
    pub fn write(&self, path: &Path, pretty: bool) -> Result<(), OutputError> {
        let bytes = if pretty {
            serde_json::to_vec_pretty(self)?
        } else {
            serde_json::to_vec(self)?
        };
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use ultimatum_types::{AgentSnapshot, StrategyKind};

    use super::*;

    fn sample() -> ResultsFile {
        let now = Utc::now();
        ResultsFile {
            metadata: RunMetadata {
                run_id: RunId::new(),
                name: "test-run".to_owned(),
                seed: 42,
                started_at: now,
                finished_at: now,
                generations: 1,
            },
            rounds: vec![RoundStats {
                mean_offer: Some(0.5),
                accept_fraction: Some(1.0),
                games_played: 2,
            }],
            generations: vec![GenerationStats {
                generation: 1,
                mean_offer: Some(0.5),
                accept_fraction: Some(1.0),
                games_played: 2,
                best_money: 1.0,
                worst_money: 1.0,
            }],
            final_population: PopulationSnapshot {
                generation: 1,
                agents: vec![AgentSnapshot {
                    id: ultimatum_types::AgentId::new(),
                    parent: None,
                    kind: StrategyKind::FixedBehavior,
                    money: 0.0,
                    genotype: None,
                }],
            },
        }
    }

    #[test]
    fn results_serialize_with_all_sections() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value["metadata"]["run_id"].is_string());
        assert_eq!(value["metadata"]["seed"], 42);
        assert_eq!(value["rounds"][0]["games_played"], 2);
        assert_eq!(value["generations"][0]["generation"], 1);
        assert_eq!(
            value["final_population"]["agents"][0]["kind"],
            "fixed_behavior"
        );
    }

    #[test]
    fn rounds_with_no_games_serialize_as_null_means() {
        let mut results = sample();
        results.rounds = vec![RoundStats {
            mean_offer: None,
            accept_fraction: None,
            games_played: 0,
        }];
        let value = serde_json::to_value(results).unwrap();
        assert!(value["rounds"][0]["mean_offer"].is_null());
        assert!(value["rounds"][0]["accept_fraction"].is_null());
    }
}
