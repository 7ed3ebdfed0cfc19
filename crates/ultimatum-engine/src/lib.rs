//! Game protocol and evolutionary tournament engine.
//!
//! This crate drives the simulation: it executes single ultimatum games
//! between paired agents, accumulates round metrics, and runs the
//! generation cycle of rounds, truncation selection, and resets. It is
//! strictly sequential and synchronous; randomness enters only through
//! the [`SmallRng`] handed in at construction, so a run is reproducible
//! from one seed.
//!
//! # Modules
//!
//! - [`error`] -- Construction-time configuration errors ([`ConfigError`])
//! - [`game`] -- One offerer→recipient transaction ([`play_game`])
//! - [`instrument`] -- Round observer seam ([`Instrument`]) and recorders
//! - [`metrics`] -- Round-scoped accumulators with explicit no-data means
//! - [`tournament`] -- The population engine ([`Tournament`])
//!
//! [`SmallRng`]: rand::rngs::SmallRng
//! [`play_game`]: game::play_game

pub mod error;
pub mod game;
pub mod instrument;
pub mod metrics;
pub mod tournament;

// Re-export primary types at crate root for convenience.
pub use error::ConfigError;
pub use game::{GamePlayed, play_game};
pub use instrument::{Instrument, NoOpInstrument, RoundLog, StatsRecorder};
pub use metrics::RoundMetrics;
pub use tournament::{Tournament, TournamentConfig};
