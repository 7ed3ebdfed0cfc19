//! Shared type definitions for the Ultimatum tournament.
//!
//! This crate is the single source of truth for the types used across the
//! Ultimatum workspace: game outcomes, the history window that indexes
//! adaptive genotypes, the genotype itself, and the serde snapshot types
//! that external metrics/persistence collaborators consume.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`history`] -- Game [`Outcome`] and the 7-key [`HistoryKey`] window
//! - [`genotype`] -- History-keyed coefficient tables and mutation
//! - [`snapshot`] -- Read-only snapshot and statistics types
//!
//! [`Outcome`]: history::Outcome
//! [`HistoryKey`]: history::HistoryKey

pub mod genotype;
pub mod history;
pub mod ids;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use genotype::{Coefficients, DEFAULT_MUTATION_RATE, Genotype, MUTATION_STEP};
pub use history::{HistoryKey, Outcome};
pub use ids::{AgentId, RunId};
pub use snapshot::{
    AgentSnapshot, GenerationStats, PopulationSnapshot, RoundStats, StrategyKind,
};
