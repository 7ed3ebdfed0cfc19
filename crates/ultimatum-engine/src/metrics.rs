//! Round-scoped metric accumulators.
//!
//! A [`RoundMetrics`] collects every game of one round: the sum of
//! offers, the number of games, and the number of accepts. The derived
//! means are [`Option`]s -- a round that recorded no games reports
//! `None`, so consumers can tell "no data" apart from "all offers were
//! zero" and no NaN ever leaks downstream.

use ultimatum_types::RoundStats;

use crate::game::GamePlayed;

/// Accumulator for one round of pairwise play.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoundMetrics {
    /// Sum of all offers observed this round.
    offer_sum: f64,
    /// Number of games played this round.
    games_played: u64,
    /// Number of games whose offer was accepted.
    accepts: u64,
}

impl RoundMetrics {
    /// A fresh, empty accumulator.
    pub const fn new() -> Self {
        Self {
            offer_sum: 0.0,
            games_played: 0,
            accepts: 0,
        }
    }

    /// Record one completed game.
    pub const fn record(&mut self, game: &GamePlayed) {
        self.offer_sum += game.offer;
        self.games_played = self.games_played.saturating_add(1);
        if game.accepted {
            self.accepts = self.accepts.saturating_add(1);
        }
    }

    /// Fold another accumulator into this one (used to derive
    /// generation aggregates from consecutive rounds).
    pub const fn absorb(&mut self, other: &Self) {
        self.offer_sum += other.offer_sum;
        self.games_played = self.games_played.saturating_add(other.games_played);
        self.accepts = self.accepts.saturating_add(other.accepts);
    }

    /// Mean offer across recorded games, or `None` if none were played.
    pub fn mean_offer(&self) -> Option<f64> {
        if self.games_played == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let games = self.games_played as f64;
        Some(self.offer_sum / games)
    }

    /// Fraction of recorded games that were accepted, or `None` if no
    /// games were played.
    pub fn accept_fraction(&self) -> Option<f64> {
        if self.games_played == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let (accepts, games) = (self.accepts as f64, self.games_played as f64);
        Some(accepts / games)
    }

    /// Number of games recorded so far.
    pub const fn games_played(&self) -> u64 {
        self.games_played
    }

    /// Number of accepted games recorded so far.
    pub const fn accepts(&self) -> u64 {
        self.accepts
    }

    /// Reset to the empty state, ready for the next round.
    pub const fn clear(&mut self) {
        *self = Self::new();
    }

    /// Export the round aggregates as a snapshot type.
    pub fn stats(&self) -> RoundStats {
        RoundStats {
            mean_offer: self.mean_offer(),
            accept_fraction: self.accept_fraction(),
            games_played: self.games_played,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const fn accepted(offer: f64) -> GamePlayed {
        GamePlayed {
            offer,
            accepted: true,
        }
    }

    const fn rejected(offer: f64) -> GamePlayed {
        GamePlayed {
            offer,
            accepted: false,
        }
    }

    #[test]
    fn zero_games_yield_no_data_not_nan() {
        let metrics = RoundMetrics::new();
        assert_eq!(metrics.mean_offer(), None);
        assert_eq!(metrics.accept_fraction(), None);
        assert_eq!(metrics.games_played(), 0);
    }

    #[test]
    fn means_follow_recorded_games() {
        let mut metrics = RoundMetrics::new();
        metrics.record(&accepted(0.25));
        metrics.record(&rejected(0.75));
        assert_eq!(metrics.mean_offer(), Some(0.5));
        assert_eq!(metrics.accept_fraction(), Some(0.5));
        assert_eq!(metrics.games_played(), 2);
        assert_eq!(metrics.accepts(), 1);
    }

    #[test]
    fn all_zero_offers_are_distinct_from_no_data() {
        let mut metrics = RoundMetrics::new();
        metrics.record(&rejected(0.0));
        assert_eq!(metrics.mean_offer(), Some(0.0));
        assert_eq!(metrics.accept_fraction(), Some(0.0));
    }

    #[test]
    fn clear_restores_the_empty_state() {
        let mut metrics = RoundMetrics::new();
        metrics.record(&accepted(0.5));
        metrics.clear();
        assert_eq!(metrics, RoundMetrics::new());
    }

    #[test]
    fn absorb_folds_round_totals() {
        let mut generation = RoundMetrics::new();
        let mut round = RoundMetrics::new();
        round.record(&accepted(0.25));
        generation.absorb(&round);
        round.clear();
        round.record(&rejected(0.75));
        generation.absorb(&round);

        assert_eq!(generation.games_played(), 2);
        assert_eq!(generation.mean_offer(), Some(0.5));
        assert_eq!(generation.accept_fraction(), Some(0.5));
    }
}
