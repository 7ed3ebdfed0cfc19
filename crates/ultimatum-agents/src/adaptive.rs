//! History-conditioned genotype strategy.
//!
//! The adaptive agent is the one non-trivial state machine in the
//! tournament. It keeps a running offer and a running acceptance
//! threshold, both starting each generation at 0.5, and a two-game
//! [`HistoryKey`] window. Every decision adds the genotype coefficient
//! for the current window to the relevant running value, clamps it to
//! the unit interval, and uses the *updated* value -- the threshold that
//! decides acceptance is the post-update one, never the stale one.
//!
//! After every game the engine feeds the outcome back through
//! [`Adaptive::observe_outcome`], which slides the history window for
//! both participants.

use rand::Rng;

use ultimatum_types::{DEFAULT_MUTATION_RATE, Genotype, HistoryKey, Outcome};

/// Running offer and threshold both start each generation here.
const STARTING_LEVEL: f64 = 0.5;

/// A strategy whose offers and threshold wander under genotype control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adaptive {
    /// Heritable coefficient tables.
    genotype: Genotype,
    /// Per-coefficient mutation probability used at reproduction.
    mutation_rate: f64,
    /// Running offer, clamped to the unit interval after every update.
    current_offer: f64,
    /// Running acceptance threshold, clamped likewise.
    current_threshold: f64,
    /// Window over the two most recent game outcomes.
    history: HistoryKey,
}

impl Adaptive {
    /// Create an adaptive strategy with the default mutation rate.
    pub const fn new(genotype: Genotype) -> Self {
        Self::with_mutation_rate(genotype, DEFAULT_MUTATION_RATE)
    }

    /// Create an adaptive strategy with an explicit mutation rate.
    pub const fn with_mutation_rate(genotype: Genotype, mutation_rate: f64) -> Self {
        Self {
            genotype,
            mutation_rate,
            current_offer: STARTING_LEVEL,
            current_threshold: STARTING_LEVEL,
            history: HistoryKey::UnknownUnknown,
        }
    }

    /// The heritable coefficient tables.
    pub const fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    /// The current running offer.
    pub const fn current_offer(&self) -> f64 {
        self.current_offer
    }

    /// The current running acceptance threshold.
    pub const fn current_threshold(&self) -> f64 {
        self.current_threshold
    }

    /// The current history window.
    pub const fn history(&self) -> HistoryKey {
        self.history
    }

    /// Advance the running offer by the coefficient for the current
    /// history window and return it.
    pub const fn decide_offer(&mut self) -> f64 {
        self.current_offer =
            (self.current_offer + self.genotype.offer.get(self.history)).clamp(0.0, 1.0);
        self.current_offer
    }

    /// Advance the running threshold, then compare: the updated
    /// threshold decides acceptance.
    pub const fn decide_accept(&mut self, offered: f64) -> bool {
        self.current_threshold =
            (self.current_threshold + self.genotype.accept.get(self.history)).clamp(0.0, 1.0);
        offered >= self.current_threshold
    }

    /// Slide the history window after a game this agent took part in,
    /// as either offerer or recipient.
    pub const fn observe_outcome(&mut self, outcome: Outcome) {
        self.history = self.history.advance(outcome);
    }

    /// Produce a child with a mutated genotype and fresh running state.
    pub fn reproduce(&self, rng: &mut impl Rng) -> Self {
        Self::with_mutation_rate(
            self.genotype.mutate(self.mutation_rate, rng),
            self.mutation_rate,
        )
    }

    /// Clear within-generation state: empty history, offer and
    /// threshold back to 0.5.
    pub const fn reset_for_generation(&mut self) {
        self.history = HistoryKey::UnknownUnknown;
        self.current_offer = STARTING_LEVEL;
        self.current_threshold = STARTING_LEVEL;
    }
}
