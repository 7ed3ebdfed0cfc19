//! Error types for tournament construction.
//!
//! All configuration problems are reported before any game is played.
//! The one deliberate non-error: an odd requested population size is
//! rounded up to even at construction, because pairing needs an even
//! count and the round-up loses no experiment information.

/// Errors raised when a tournament configuration fails validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The population cannot host a single pairing.
    #[error("population size must be at least 2, got {size}")]
    PopulationTooSmall {
        /// The requested population size.
        size: usize,
    },

    /// Selection would replace too many (or no) agents.
    #[error(
        "kills_per_generation must be between 1 and population size, \
         got {kills} for a population of {population}"
    )]
    InvalidKillCount {
        /// The requested kill count.
        kills: usize,
        /// The (already rounded) population size.
        population: usize,
    },

    /// A zero-iteration pairing plays no games and yields no data.
    #[error("iterations_per_pairing must be at least 1")]
    ZeroIterations,

    /// A zero-round generation plays no games and yields no data.
    #[error("rounds_per_generation must be at least 1")]
    ZeroRounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_their_parameters() {
        let error = ConfigError::InvalidKillCount {
            kills: 10,
            population: 4,
        };
        let message = error.to_string();
        assert!(message.contains("10"));
        assert!(message.contains("4"));
    }
}
