//! The closed strategy set and its capability surface.
//!
//! Dispatch is a tagged union rather than trait objects: the variant
//! set is closed by design (it is the experiment's independent
//! variable), reproduction returns an owned [`Strategy`] without boxing,
//! and the engine can pattern-match when a snapshot needs
//! variant-specific data such as the adaptive genotype.

use rand::Rng;

use ultimatum_types::{Genotype, Outcome, StrategyKind};

use crate::adaptive::Adaptive;
use crate::baseline::{AlwaysAccept, Alternating, RandomPlay};
use crate::fixed::FixedBehavior;

/// One of the five strategy variants, behind the five-operation
/// capability surface of the tournament.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Constant offer/threshold with copy-time jitter.
    Fixed(FixedBehavior),
    /// History-conditioned genotype agent.
    Adaptive(Adaptive),
    /// Accepts everything.
    AlwaysAccept(AlwaysAccept),
    /// Accept decision flips on every call.
    Alternating(Alternating),
    /// Uniform-random offers, coin-flip acceptance.
    Random(RandomPlay),
}

impl Strategy {
    /// Which variant this is, for snapshots and logging.
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Fixed(_) => StrategyKind::FixedBehavior,
            Self::Adaptive(_) => StrategyKind::Adaptive,
            Self::AlwaysAccept(_) => StrategyKind::AlwaysAccept,
            Self::Alternating(_) => StrategyKind::Alternating,
            Self::Random(_) => StrategyKind::Random,
        }
    }

    /// The genotype, for adaptive strategies only.
    pub const fn genotype(&self) -> Option<&Genotype> {
        match self {
            Self::Adaptive(adaptive) => Some(adaptive.genotype()),
            _ => None,
        }
    }

    /// Decide what fraction of the pot to offer. Stateful variants
    /// advance their internal state, so repeated calls may differ.
    pub fn decide_offer(&mut self, rng: &mut impl Rng) -> f64 {
        match self {
            Self::Fixed(fixed) => fixed.decide_offer(),
            Self::Adaptive(adaptive) => adaptive.decide_offer(),
            Self::AlwaysAccept(always) => always.decide_offer(),
            Self::Alternating(alternating) => alternating.decide_offer(),
            Self::Random(random) => random.decide_offer(rng),
        }
    }

    /// Decide whether to accept `offered`. For stateful variants the
    /// internal state advances *before* the comparison, so the updated
    /// state determines acceptance.
    pub fn decide_accept(&mut self, offered: f64, rng: &mut impl Rng) -> bool {
        match self {
            Self::Fixed(fixed) => fixed.decide_accept(offered),
            Self::Adaptive(adaptive) => adaptive.decide_accept(offered),
            Self::AlwaysAccept(always) => always.decide_accept(offered),
            Self::Alternating(alternating) => alternating.decide_accept(offered),
            Self::Random(random) => random.decide_accept(offered, rng),
        }
    }

    /// Record the outcome of a game this strategy took part in. Applied
    /// by the game protocol to both participants; only history-aware
    /// variants react.
    pub const fn observe_outcome(&mut self, outcome: Outcome) {
        if let Self::Adaptive(adaptive) = self {
            adaptive.observe_outcome(outcome);
        }
    }

    /// Produce an independent, possibly mutated copy for the next
    /// generation. No mutable state is shared with the original.
    pub fn reproduce(&self, rng: &mut impl Rng) -> Self {
        match self {
            Self::Fixed(fixed) => Self::Fixed(fixed.reproduce(rng)),
            Self::Adaptive(adaptive) => Self::Adaptive(adaptive.reproduce(rng)),
            Self::AlwaysAccept(always) => Self::AlwaysAccept(always.reproduce(rng)),
            Self::Alternating(alternating) => Self::Alternating(alternating.reproduce()),
            Self::Random(random) => Self::Random(random.reproduce()),
        }
    }

    /// Clear within-generation decision state. Money is not touched;
    /// resetting payoffs is the population engine's job.
    pub const fn reset_for_generation(&mut self) {
        if let Self::Adaptive(adaptive) = self {
            adaptive.reset_for_generation();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use ultimatum_types::Genotype;

    use super::*;

    #[test]
    fn kind_matches_variant() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            Strategy::Fixed(FixedBehavior::new(0.5)).kind(),
            StrategyKind::FixedBehavior
        );
        assert_eq!(
            Strategy::Adaptive(Adaptive::new(Genotype::zero())).kind(),
            StrategyKind::Adaptive
        );
        assert_eq!(
            Strategy::Random(RandomPlay::default()).kind(),
            StrategyKind::Random
        );
        assert_eq!(
            Strategy::AlwaysAccept(AlwaysAccept::new(&mut rng)).kind(),
            StrategyKind::AlwaysAccept
        );
    }

    #[test]
    fn genotype_is_exposed_only_for_adaptive() {
        let adaptive = Strategy::Adaptive(Adaptive::new(Genotype::zero()));
        assert!(adaptive.genotype().is_some());
        let fixed = Strategy::Fixed(FixedBehavior::new(0.5));
        assert!(fixed.genotype().is_none());
    }

    #[test]
    fn non_adaptive_variants_ignore_outcomes() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut strategy = Strategy::Fixed(FixedBehavior::new(0.4));
        let before = strategy;
        strategy.observe_outcome(Outcome::Rejected);
        assert_eq!(strategy, before);
        assert_eq!(strategy.decide_offer(&mut rng), 0.4);
    }

    #[test]
    fn reproduce_yields_same_variant() {
        let mut rng = SmallRng::seed_from_u64(3);
        let strategies = [
            Strategy::Fixed(FixedBehavior::new(0.5)),
            Strategy::Adaptive(Adaptive::new(Genotype::zero())),
            Strategy::AlwaysAccept(AlwaysAccept::new(&mut rng)),
            Strategy::Alternating(Alternating::new(&mut rng)),
            Strategy::Random(RandomPlay::default()),
        ];
        for strategy in strategies {
            assert_eq!(strategy.reproduce(&mut rng).kind(), strategy.kind());
        }
    }
}
