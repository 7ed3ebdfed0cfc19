//! The strategy factory seam between configuration and the engine.
//!
//! The population engine does not know how strategies are built; it
//! pulls them through the [`StrategyFactory`] trait at construction
//! time. Tests hand in closures; the runner hands in a
//! [`StrategySpec`], the serde-tagged description that appears under
//! `population.strategy` in the config file.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use ultimatum_types::{DEFAULT_MUTATION_RATE, Genotype};

use crate::adaptive::Adaptive;
use crate::baseline::{AlwaysAccept, Alternating, RandomPlay};
use crate::error::{StrategyError, check_unit};
use crate::fixed::FixedBehavior;
use crate::strategy::Strategy;

/// A source of freshly constructed strategies.
///
/// Implementations draw any construction-time randomness (random fixed
/// offers, initial genotypes) from the RNG handle the engine threads
/// through, so whole runs stay reproducible from one seed.
pub trait StrategyFactory {
    /// Build one strategy for a new population slot.
    fn make(&mut self, rng: &mut dyn RngCore) -> Strategy;
}

impl<F> StrategyFactory for F
where
    F: FnMut(&mut dyn RngCore) -> Strategy,
{
    fn make(&mut self, rng: &mut dyn RngCore) -> Strategy {
        self(rng)
    }
}

/// Default init range for adaptive genotype coefficients.
fn default_init_range() -> f64 {
    0.05
}

/// Default per-coefficient mutation probability.
fn default_mutation_rate() -> f64 {
    DEFAULT_MUTATION_RATE
}

/// Default acceptance probability for random players.
fn default_accept_probability() -> f64 {
    RandomPlay::DEFAULT_ACCEPT_PROBABILITY
}

/// Config-file description of how to build each agent's strategy.
///
/// Deserializes from the `population.strategy` section, e.g.
///
/// ```yaml
/// strategy:
///   type: adaptive
///   init_range: 0.05
///   mutation_rate: 0.2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategySpec {
    /// Every agent offers `offer` and accepts at `threshold`
    /// (defaulting to the offer itself).
    Fixed {
        /// The constant offer.
        offer: f64,
        /// The acceptance threshold; defaults to `offer` when omitted.
        #[serde(default)]
        threshold: Option<f64>,
    },
    /// Every agent gets its own uniform-random constant offer (and
    /// matching threshold) -- the classic starting population.
    FixedRandom,
    /// History-conditioned genotype agents with random initial
    /// coefficients.
    Adaptive {
        /// Initial coefficients are uniform in `[-init_range, +init_range]`.
        #[serde(default = "default_init_range")]
        init_range: f64,
        /// Per-coefficient mutation probability at reproduction.
        #[serde(default = "default_mutation_rate")]
        mutation_rate: f64,
    },
    /// Baseline: accepts everything.
    AlwaysAccept,
    /// Baseline: accept decision flips every call.
    Alternating,
    /// Baseline: random offers, weighted-coin acceptance.
    Random {
        /// Probability of accepting any offer.
        #[serde(default = "default_accept_probability")]
        accept_probability: f64,
    },
}

impl StrategySpec {
    /// Validate all parameters before a tournament is built.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError`] if any parameter is outside the unit
    /// interval or not finite.
    pub fn validate(&self) -> Result<(), StrategyError> {
        match *self {
            Self::Fixed { offer, threshold } => {
                check_unit("offer", offer)?;
                if let Some(threshold) = threshold {
                    check_unit("threshold", threshold)?;
                }
                Ok(())
            }
            Self::Adaptive {
                init_range,
                mutation_rate,
            } => {
                check_unit("init_range", init_range)?;
                check_unit("mutation_rate", mutation_rate)
            }
            Self::Random { accept_probability } => {
                check_unit("accept_probability", accept_probability)
            }
            Self::FixedRandom | Self::AlwaysAccept | Self::Alternating => Ok(()),
        }
    }
}

impl StrategyFactory for StrategySpec {
    fn make(&mut self, mut rng: &mut dyn RngCore) -> Strategy {
        match *self {
            Self::Fixed { offer, threshold } => Strategy::Fixed(threshold.map_or_else(
                || FixedBehavior::new(offer),
                |threshold| FixedBehavior::with_threshold(offer, threshold),
            )),
            Self::FixedRandom => Strategy::Fixed(FixedBehavior::new(rng.random())),
            Self::Adaptive {
                init_range,
                mutation_rate,
            } => Strategy::Adaptive(Adaptive::with_mutation_rate(
                Genotype::uniform(init_range, &mut rng),
                mutation_rate,
            )),
            Self::AlwaysAccept => Strategy::AlwaysAccept(AlwaysAccept::new(&mut rng)),
            Self::Alternating => Strategy::Alternating(Alternating::new(&mut rng)),
            Self::Random { accept_probability } => {
                Strategy::Random(RandomPlay::new(accept_probability))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::unreachable)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use ultimatum_types::StrategyKind;

    use super::*;

    #[test]
    fn closures_are_factories() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut factory = |_: &mut dyn RngCore| Strategy::Fixed(FixedBehavior::new(0.5));
        assert_eq!(
            factory.make(&mut rng).kind(),
            StrategyKind::FixedBehavior
        );
    }

    #[test]
    fn spec_builds_matching_variants() {
        let mut rng = SmallRng::seed_from_u64(2);
        let cases = [
            (
                StrategySpec::Fixed {
                    offer: 0.6,
                    threshold: None,
                },
                StrategyKind::FixedBehavior,
            ),
            (StrategySpec::FixedRandom, StrategyKind::FixedBehavior),
            (
                StrategySpec::Adaptive {
                    init_range: 0.05,
                    mutation_rate: 0.2,
                },
                StrategyKind::Adaptive,
            ),
            (StrategySpec::AlwaysAccept, StrategyKind::AlwaysAccept),
            (StrategySpec::Alternating, StrategyKind::Alternating),
            (
                StrategySpec::Random {
                    accept_probability: 0.5,
                },
                StrategyKind::Random,
            ),
        ];
        for (mut spec, expected) in cases {
            assert_eq!(spec.make(&mut rng).kind(), expected);
        }
    }

    #[test]
    fn fixed_threshold_defaults_to_offer() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut spec = StrategySpec::Fixed {
            offer: 0.3,
            threshold: None,
        };
        if let Strategy::Fixed(fixed) = spec.make(&mut rng) {
            assert_eq!(fixed.threshold(), 0.3);
        } else {
            unreachable!("spec built the wrong variant");
        }
    }

    #[test]
    fn spec_deserializes_with_defaults() {
        let spec: StrategySpec = serde_json::from_str(r#"{"type":"adaptive"}"#).unwrap();
        assert_eq!(
            spec,
            StrategySpec::Adaptive {
                init_range: 0.05,
                mutation_rate: 0.2,
            }
        );

        let spec: StrategySpec =
            serde_json::from_str(r#"{"type":"fixed","offer":0.6}"#).unwrap();
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range_parameters() {
        let spec = StrategySpec::Fixed {
            offer: 1.2,
            threshold: None,
        };
        assert!(spec.validate().is_err());

        let spec = StrategySpec::Random {
            accept_probability: -0.1,
        };
        assert!(spec.validate().is_err());

        let spec = StrategySpec::Adaptive {
            init_range: 0.05,
            mutation_rate: f64::NAN,
        };
        assert!(spec.validate().is_err());
    }
}
