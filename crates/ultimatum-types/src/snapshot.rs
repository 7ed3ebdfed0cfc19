//! Read-only snapshot and statistics types.
//!
//! These are the payloads the tournament core exposes to external
//! collaborators (plotting, persistence, dashboards). They are plain
//! serde types with no behaviour; the engine produces them at round and
//! generation boundaries and the runner serializes them to the results
//! file.

use serde::{Deserialize, Serialize};

use crate::genotype::Genotype;
use crate::ids::AgentId;

/// The closed set of strategy variants, by name.
///
/// Used in snapshots so collaborators can partition agents by strategy
/// without the core leaking its dispatch representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Constant offer/threshold with copy-time jitter.
    FixedBehavior,
    /// History-conditioned genotype agent.
    Adaptive,
    /// Accepts everything; offers a fixed random value.
    AlwaysAccept,
    /// Accept decision flips on every call.
    Alternating,
    /// Uniform-random offers, coin-flip acceptance.
    Random,
}

/// One agent's externally visible state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// The agent's identifier.
    pub id: AgentId,
    /// The agent this one was cloned from during selection, if any.
    pub parent: Option<AgentId>,
    /// Which strategy variant the agent runs.
    pub kind: StrategyKind,
    /// Money accumulated so far this generation.
    pub money: f64,
    /// The genotype, for adaptive agents only.
    pub genotype: Option<Genotype>,
}

/// The whole population at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    /// Number of completed generations when the snapshot was taken.
    pub generation: u64,
    /// Every agent, in population order.
    pub agents: Vec<AgentSnapshot>,
}

/// Aggregates for a single round of pairwise play.
///
/// The means are `None` when no games were recorded, so a consumer can
/// tell "no data this round" apart from "all offers were zero".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    /// Mean offer across all games this round, if any were played.
    pub mean_offer: Option<f64>,
    /// Fraction of games whose offer was accepted, if any were played.
    pub accept_fraction: Option<f64>,
    /// Total games played this round.
    pub games_played: u64,
}

/// Aggregates for a full generation (all of its rounds combined).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// The generation number that just completed (1-based).
    pub generation: u64,
    /// Mean offer across every game in the generation, if any.
    pub mean_offer: Option<f64>,
    /// Fraction of accepted games across the generation, if any.
    pub accept_fraction: Option<f64>,
    /// Total games played in the generation.
    pub games_played: u64,
    /// Highest pre-reset money in the population.
    pub best_money: f64,
    /// Lowest pre-reset money in the population.
    pub worst_money: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_stats_distinguish_no_data_from_zero() {
        let empty = RoundStats {
            mean_offer: None,
            accept_fraction: None,
            games_played: 0,
        };
        let json = serde_json::to_string(&empty).unwrap();
        // No-data rounds serialize as explicit nulls, not zeros.
        assert!(json.contains("\"mean_offer\":null"));

        let zeros = RoundStats {
            mean_offer: Some(0.0),
            accept_fraction: Some(0.0),
            games_played: 4,
        };
        let json = serde_json::to_string(&zeros).unwrap();
        assert!(json.contains("\"mean_offer\":0.0"));
    }

    #[test]
    fn snapshot_roundtrip() {
        let snapshot = PopulationSnapshot {
            generation: 3,
            agents: vec![AgentSnapshot {
                id: AgentId::new(),
                parent: None,
                kind: StrategyKind::Adaptive,
                money: 1.25,
                genotype: Some(Genotype::zero()),
            }],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: PopulationSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
