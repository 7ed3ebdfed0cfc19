//! Constant offer/threshold strategy with copy-time jitter.
//!
//! A `FixedBehavior` agent never changes its mind within a generation:
//! it always offers the same fraction and accepts anything at or above
//! its threshold. Evolution acts on it only at reproduction time, when
//! each of the two parameters independently drifts by one hundredth of
//! the pot (or stays put).

use rand::Rng;

/// Size of the copy-time drift step applied to offer and threshold.
const JITTER_STEP: f64 = 0.01;

/// A strategy with a constant offer and a constant acceptance threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedBehavior {
    /// The fraction of the pot this agent always offers.
    offer: f64,
    /// The minimum offer this agent will accept.
    threshold: f64,
}

impl FixedBehavior {
    /// Create a strategy that offers `offer` and accepts anything at or
    /// above it (threshold defaults to the offer).
    pub const fn new(offer: f64) -> Self {
        Self {
            offer,
            threshold: offer,
        }
    }

    /// Create a strategy with distinct offer and acceptance threshold.
    pub const fn with_threshold(offer: f64, threshold: f64) -> Self {
        Self { offer, threshold }
    }

    /// The constant offer.
    pub const fn offer(&self) -> f64 {
        self.offer
    }

    /// The constant acceptance threshold.
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Decide what to offer: always the stored constant.
    pub const fn decide_offer(&self) -> f64 {
        self.offer
    }

    /// Accept exactly the offers that meet the threshold.
    pub const fn decide_accept(&self, offered: f64) -> bool {
        offered >= self.threshold
    }

    /// Produce a drifted copy for the next generation.
    ///
    /// Offer and threshold are independently perturbed by one of
    /// `{-0.01, 0, +0.01}` chosen uniformly, then clamped to the unit
    /// interval so drift cannot walk a lineage out of the game's domain.
    pub fn reproduce(&self, rng: &mut impl Rng) -> Self {
        Self {
            offer: (self.offer + jitter(rng)).clamp(0.0, 1.0),
            threshold: (self.threshold + jitter(rng)).clamp(0.0, 1.0),
        }
    }
}

/// Draw one drift step: -0.01, 0, or +0.01 with equal probability.
fn jitter(rng: &mut impl Rng) -> f64 {
    match rng.random_range(0..3_u8) {
        0 => -JITTER_STEP,
        1 => 0.0,
        _ => JITTER_STEP,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn offers_are_constant() {
        let strategy = FixedBehavior::new(0.6);
        assert_eq!(strategy.decide_offer(), 0.6);
        assert_eq!(strategy.decide_offer(), 0.6);
        assert_eq!(strategy.threshold(), 0.6);
    }

    #[test]
    fn accepts_at_or_above_threshold() {
        let strategy = FixedBehavior::with_threshold(0.3, 0.5);
        assert!(strategy.decide_accept(0.5));
        assert!(strategy.decide_accept(0.6));
        assert!(!strategy.decide_accept(0.49));
    }

    #[test]
    fn reproduce_drifts_by_at_most_one_step() {
        let mut rng = SmallRng::seed_from_u64(5);
        let parent = FixedBehavior::with_threshold(0.4, 0.6);
        for _ in 0..200 {
            let child = parent.reproduce(&mut rng);
            assert!((child.offer() - parent.offer()).abs() <= JITTER_STEP + 1e-12);
            assert!((child.threshold() - parent.threshold()).abs() <= JITTER_STEP + 1e-12);
        }
    }

    #[test]
    fn reproduce_clamps_to_unit_interval() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut strategy = FixedBehavior::with_threshold(0.0, 1.0);
        // Many generations of drift must never escape [0, 1].
        for _ in 0..500 {
            strategy = strategy.reproduce(&mut rng);
            assert!((0.0..=1.0).contains(&strategy.offer()));
            assert!((0.0..=1.0).contains(&strategy.threshold()));
        }
    }
}
