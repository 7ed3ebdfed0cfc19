//! Strategy variants, agents, and the strategy factory.
//!
//! This crate is the decision layer of the Ultimatum tournament. It
//! defines the closed set of strategy variants behind one capability
//! surface ([`Strategy`]), the [`Agent`] that carries a strategy plus
//! its per-generation payoff, and the [`StrategyFactory`] seam through
//! which the engine populates a tournament.
//!
//! Strategies never touch each other's internals: the engine applies
//! post-game outcome deltas to both participants through
//! [`Strategy::observe_outcome`], and money moves only through
//! [`Agent::credit`].
//!
//! # Modules
//!
//! - [`adaptive`] -- History-conditioned genotype strategy
//! - [`agent`] -- [`Agent`]: identity, lineage, money, strategy
//! - [`baseline`] -- Always-accept, alternating, and random baselines
//! - [`error`] -- Parameter validation errors ([`StrategyError`])
//! - [`factory`] -- [`StrategyFactory`] trait and config-driven [`StrategySpec`]
//! - [`fixed`] -- Constant offer/threshold strategy with copy-time jitter
//! - [`strategy`] -- The [`Strategy`] enum and its five operations

pub mod adaptive;
pub mod agent;
pub mod baseline;
pub mod error;
pub mod factory;
pub mod fixed;
pub mod strategy;

// Re-export primary types at crate root for convenience.
pub use adaptive::Adaptive;
pub use agent::Agent;
pub use baseline::{AlwaysAccept, Alternating, RandomPlay};
pub use error::StrategyError;
pub use factory::{StrategyFactory, StrategySpec};
pub use fixed::FixedBehavior;
pub use strategy::Strategy;
