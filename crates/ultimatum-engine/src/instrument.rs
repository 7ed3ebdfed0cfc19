//! Round observer seam for metrics collaborators.
//!
//! External consumers (plotting, persistence, dashboards) never reach
//! into the tournament mid-round. Instead they implement [`Instrument`]
//! and get called once per round, with that round's aggregates, just
//! before the accumulator is cleared.

use tracing::debug;

use ultimatum_types::RoundStats;

/// Callback invoked at the end of every round.
pub trait Instrument {
    /// Called once per round with the round's aggregates, before the
    /// round accumulator is cleared.
    fn on_round(&mut self, stats: &RoundStats);
}

/// A no-op instrument for tests and callers that only want summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpInstrument;

impl NoOpInstrument {
    /// Create a no-op instrument.
    pub const fn new() -> Self {
        Self
    }
}

impl Instrument for NoOpInstrument {
    fn on_round(&mut self, _stats: &RoundStats) {}
}

/// Logs each round's aggregates at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundLog;

impl Instrument for RoundLog {
    fn on_round(&mut self, stats: &RoundStats) {
        debug!(
            mean_offer = ?stats.mean_offer,
            accept_fraction = ?stats.accept_fraction,
            games_played = stats.games_played,
            "round complete"
        );
    }
}

/// Records the full per-round time series for later export.
///
/// This is the workhorse instrument: the runner attaches one and turns
/// the recorded series into the results file. The opening-offer series
/// and the acceptance series of the classic experiment are views over
/// the same recording.
#[derive(Debug, Clone, Default)]
pub struct StatsRecorder {
    rounds: Vec<RoundStats>,
}

impl StatsRecorder {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self { rounds: Vec::new() }
    }

    /// All recorded rounds, in order.
    pub fn rounds(&self) -> &[RoundStats] {
        &self.rounds
    }

    /// Mean offer per round (`None` entries mark rounds with no games).
    pub fn mean_offers(&self) -> Vec<Option<f64>> {
        self.rounds.iter().map(|stats| stats.mean_offer).collect()
    }

    /// Accepted fraction per round.
    pub fn accept_fractions(&self) -> Vec<Option<f64>> {
        self.rounds
            .iter()
            .map(|stats| stats.accept_fraction)
            .collect()
    }

    /// Consume the recorder, yielding the recorded rounds.
    pub fn into_rounds(self) -> Vec<RoundStats> {
        self.rounds
    }
}

impl Instrument for StatsRecorder {
    fn on_round(&mut self, stats: &RoundStats) {
        self.rounds.push(*stats);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn stats(mean_offer: f64, games: u64) -> RoundStats {
        RoundStats {
            mean_offer: Some(mean_offer),
            accept_fraction: Some(1.0),
            games_played: games,
        }
    }

    #[test]
    fn recorder_keeps_rounds_in_order() {
        let mut recorder = StatsRecorder::new();
        recorder.on_round(&stats(0.25, 2));
        recorder.on_round(&stats(0.75, 4));

        assert_eq!(recorder.rounds().len(), 2);
        assert_eq!(recorder.mean_offers(), vec![Some(0.25), Some(0.75)]);
        assert_eq!(recorder.accept_fractions(), vec![Some(1.0), Some(1.0)]);
    }

    #[test]
    fn noop_instrument_ignores_rounds() {
        let mut noop = NoOpInstrument::new();
        noop.on_round(&stats(0.5, 1));
    }
}
