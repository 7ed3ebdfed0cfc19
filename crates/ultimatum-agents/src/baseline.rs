//! Simple baseline strategies.
//!
//! These exist to give the evolved strategies something dumb to play
//! against in control experiments: an unconditional accepter, a blind
//! alternator, and a coin-flipper. None of them condition on the offer
//! history; reproduction copies their fixed parameters.

use rand::Rng;

/// Accepts every offer; makes a constant offer drawn at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlwaysAccept {
    /// The fixed offer, drawn uniformly when the agent is created.
    offer: f64,
}

impl AlwaysAccept {
    /// Create an accepter with a uniform-random fixed offer.
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            offer: rng.random(),
        }
    }

    /// The fixed offer.
    pub const fn offer(&self) -> f64 {
        self.offer
    }

    /// Always the same offer.
    pub const fn decide_offer(&self) -> f64 {
        self.offer
    }

    /// Threshold is zero: any nonnegative offer is fine.
    pub const fn decide_accept(&self, offered: f64) -> bool {
        offered >= 0.0
    }

    /// Children redraw their fixed offer.
    pub fn reproduce(&self, rng: &mut impl Rng) -> Self {
        Self::new(rng)
    }
}

/// Accept decision flips on every call, regardless of the offer.
///
/// The stored flag starts `true` and is flipped *before* being
/// returned, so the first decision is a rejection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alternating {
    /// The fixed offer, drawn uniformly when the agent is created.
    offer: f64,
    /// The toggle; flipped before each accept decision is returned.
    will_accept: bool,
}

impl Alternating {
    /// Create an alternator with a uniform-random fixed offer.
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            offer: rng.random(),
            will_accept: true,
        }
    }

    /// The fixed offer.
    pub const fn offer(&self) -> f64 {
        self.offer
    }

    /// Always the same offer.
    pub const fn decide_offer(&self) -> f64 {
        self.offer
    }

    /// Flip the toggle, then answer with it. The offered amount is
    /// ignored entirely.
    pub const fn decide_accept(&mut self, _offered: f64) -> bool {
        self.will_accept = !self.will_accept;
        self.will_accept
    }

    /// Children keep the parent's offer with a fresh toggle.
    pub const fn reproduce(&self) -> Self {
        Self {
            offer: self.offer,
            will_accept: true,
        }
    }
}

/// Uniform-random offers and a weighted-coin accept decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomPlay {
    /// Probability of accepting any offer.
    accept_probability: f64,
}

impl RandomPlay {
    /// Default acceptance probability for random players.
    pub const DEFAULT_ACCEPT_PROBABILITY: f64 = 0.5;

    /// Create a random player. The probability is clamped to the unit
    /// interval so the coin flip is always well defined.
    pub const fn new(accept_probability: f64) -> Self {
        Self {
            accept_probability: accept_probability.clamp(0.0, 1.0),
        }
    }

    /// The acceptance probability.
    pub const fn accept_probability(&self) -> f64 {
        self.accept_probability
    }

    /// A fresh uniform draw on every call.
    pub fn decide_offer(&self, rng: &mut impl Rng) -> f64 {
        rng.random()
    }

    /// A weighted coin flip, independent of the offered amount.
    pub fn decide_accept(&self, _offered: f64, rng: &mut impl Rng) -> bool {
        rng.random_bool(self.accept_probability)
    }

    /// Children keep the parent's acceptance probability.
    pub const fn reproduce(&self) -> Self {
        *self
    }
}

impl Default for RandomPlay {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ACCEPT_PROBABILITY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn always_accept_accepts_everything() {
        let mut rng = SmallRng::seed_from_u64(1);
        let strategy = AlwaysAccept::new(&mut rng);
        assert!(strategy.decide_accept(0.0));
        assert!(strategy.decide_accept(1.0));
        assert!((0.0..1.0).contains(&strategy.decide_offer()));
    }

    #[test]
    fn alternating_starts_with_reject() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut strategy = Alternating::new(&mut rng);
        assert!(!strategy.decide_accept(1.0));
        assert!(strategy.decide_accept(0.0));
        assert!(!strategy.decide_accept(1.0));
    }

    #[test]
    fn alternating_child_keeps_offer_with_fresh_toggle() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut parent = Alternating::new(&mut rng);
        let _ = parent.decide_accept(0.5);
        let mut child = parent.reproduce();
        assert_eq!(child.offer(), parent.offer());
        // Fresh toggle: the child's first decision is a rejection again.
        assert!(!child.decide_accept(1.0));
    }

    #[test]
    fn random_play_extremes_are_deterministic() {
        let mut rng = SmallRng::seed_from_u64(3);
        let always = RandomPlay::new(1.0);
        let never = RandomPlay::new(0.0);
        for _ in 0..20 {
            assert!(always.decide_accept(0.5, &mut rng));
            assert!(!never.decide_accept(0.5, &mut rng));
        }
    }

    #[test]
    fn random_play_probability_is_clamped() {
        assert_eq!(RandomPlay::new(1.5).accept_probability(), 1.0);
        assert_eq!(RandomPlay::new(-0.5).accept_probability(), 0.0);
    }
}
