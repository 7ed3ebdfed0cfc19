//! History-keyed coefficient tables and genotype mutation.
//!
//! An adaptive agent's genotype is a pair of [`Coefficients`] tables,
//! one driving the running offer and one driving the acceptance
//! threshold. Each table holds exactly one `f64` per [`HistoryKey`],
//! laid out in the canonical [`HistoryKey::ALL`] order. Mutation is
//! clone-then-perturb: the parent's tables are copied by value and the
//! copy is perturbed, so a child never aliases its parent's storage.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::history::HistoryKey;

/// Probability that any single coefficient is perturbed during mutation.
pub const DEFAULT_MUTATION_RATE: f64 = 0.2;

/// Half-width of the uniform perturbation applied to a mutated
/// coefficient: draws come from `[-MUTATION_STEP, +MUTATION_STEP]`.
pub const MUTATION_STEP: f64 = 0.025;

/// A total mapping from [`HistoryKey`] to an `f64` coefficient.
///
/// Stored as a fixed array in [`HistoryKey::ALL`] order; indexing by
/// key cannot fail and the key set cannot change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients([f64; 7]);

impl Coefficients {
    /// A table with every coefficient set to zero.
    pub const fn zero() -> Self {
        Self([0.0; 7])
    }

    /// Build a table from values given in [`HistoryKey::ALL`] order.
    pub const fn from_values(values: [f64; 7]) -> Self {
        Self(values)
    }

    /// The raw values in [`HistoryKey::ALL`] order.
    pub const fn values(self) -> [f64; 7] {
        self.0
    }

    /// Build a table by evaluating `f` for each key in canonical order.
    pub fn from_fn(mut f: impl FnMut(HistoryKey) -> f64) -> Self {
        Self([
            f(HistoryKey::UnknownUnknown),
            f(HistoryKey::UnknownAccepted),
            f(HistoryKey::UnknownRejected),
            f(HistoryKey::AcceptedAccepted),
            f(HistoryKey::AcceptedRejected),
            f(HistoryKey::RejectedAccepted),
            f(HistoryKey::RejectedRejected),
        ])
    }

    /// Look up the coefficient for a history key.
    pub const fn get(self, key: HistoryKey) -> f64 {
        match key {
            HistoryKey::UnknownUnknown => self.0[0],
            HistoryKey::UnknownAccepted => self.0[1],
            HistoryKey::UnknownRejected => self.0[2],
            HistoryKey::AcceptedAccepted => self.0[3],
            HistoryKey::AcceptedRejected => self.0[4],
            HistoryKey::RejectedAccepted => self.0[5],
            HistoryKey::RejectedRejected => self.0[6],
        }
    }
}

/// The heritable behaviour of an adaptive agent: one coefficient table
/// for offers and one for acceptance thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Genotype {
    /// Per-history increments applied to the running offer.
    pub offer: Coefficients,
    /// Per-history increments applied to the acceptance threshold.
    pub accept: Coefficients,
}

impl Genotype {
    /// A genotype whose coefficients are all zero (behaviour never
    /// moves off the 0.5 starting point).
    pub const fn zero() -> Self {
        Self {
            offer: Coefficients::zero(),
            accept: Coefficients::zero(),
        }
    }

    /// Build a genotype from explicit offer and accept tables.
    pub const fn new(offer: Coefficients, accept: Coefficients) -> Self {
        Self { offer, accept }
    }

    /// Draw a random genotype with every coefficient uniform in
    /// `[-range, +range]`. Used to seed initial populations.
    pub fn uniform(range: f64, rng: &mut impl Rng) -> Self {
        Self {
            offer: Coefficients::from_fn(|_| rng.random_range(-range..=range)),
            accept: Coefficients::from_fn(|_| rng.random_range(-range..=range)),
        }
    }

    /// Produce a mutated copy of this genotype.
    ///
    /// Each of the 14 coefficients independently receives, with
    /// probability `rate`, a perturbation drawn uniformly from
    /// `[-MUTATION_STEP, +MUTATION_STEP]`. The parent is never touched;
    /// the returned genotype owns fresh storage.
    pub fn mutate(&self, rate: f64, rng: &mut impl Rng) -> Self {
        Self {
            offer: Coefficients::from_fn(|key| perturb(self.offer.get(key), rate, rng)),
            accept: Coefficients::from_fn(|key| perturb(self.accept.get(key), rate, rng)),
        }
    }
}

/// Apply the per-coefficient mutation rule: with probability `rate`,
/// shift `value` by a uniform draw from the mutation step interval.
fn perturb(value: f64, rate: f64, rng: &mut impl Rng) -> f64 {
    if rng.random_bool(rate.clamp(0.0, 1.0)) {
        value + rng.random_range(-MUTATION_STEP..=MUTATION_STEP)
    } else {
        value
    }
}
