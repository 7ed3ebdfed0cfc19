//! The tournament participant: identity, lineage, money, strategy.
//!
//! An [`Agent`] is owned exclusively by the population engine's agent
//! list. Money only moves through [`Agent::credit`], called by the game
//! protocol's settlement step, and is zeroed by the engine at generation
//! boundaries. Lineage (`parent`) records which agent a selection clone
//! descends from, which is what makes selection auditable from the
//! outside.

use rand::Rng;

use ultimatum_types::{AgentId, AgentSnapshot};

use crate::strategy::Strategy;

/// One participant in the population.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Stable identity for lineage tracking and snapshots.
    id: AgentId,
    /// The agent this one was cloned from during selection, if any.
    parent: Option<AgentId>,
    /// Payoff accumulated within the current generation.
    money: f64,
    /// The agent's decision logic.
    strategy: Strategy,
}

impl Agent {
    /// Create a founding agent (no parent) with zero money.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            id: AgentId::new(),
            parent: None,
            money: 0.0,
            strategy,
        }
    }

    /// The agent's identifier.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// The parent this agent was cloned from, if any.
    pub const fn parent(&self) -> Option<AgentId> {
        self.parent
    }

    /// Money accumulated so far this generation.
    pub const fn money(&self) -> f64 {
        self.money
    }

    /// Borrow the strategy.
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Mutably borrow the strategy (the game protocol drives decisions
    /// through this).
    pub const fn strategy_mut(&mut self) -> &mut Strategy {
        &mut self.strategy
    }

    /// Credit a settlement amount. Amounts are always nonnegative
    /// fractions of the pot, so money never decreases here.
    pub const fn credit(&mut self, amount: f64) {
        self.money += amount;
    }

    /// Zero the generation payoff. Called by the engine at the end of a
    /// generation, after selection has ranked on the pre-reset values.
    pub const fn reset_money(&mut self) {
        self.money = 0.0;
    }

    /// Clear within-generation decision state (history, running
    /// offer/threshold). Money is deliberately left alone.
    pub const fn reset_for_generation(&mut self) {
        self.strategy.reset_for_generation();
    }

    /// Produce a child agent: fresh identity, lineage pointing here,
    /// zero money, mutated strategy with no shared mutable state.
    pub fn reproduce(&self, rng: &mut impl Rng) -> Self {
        Self {
            id: AgentId::new(),
            parent: Some(self.id),
            money: 0.0,
            strategy: self.strategy.reproduce(rng),
        }
    }

    /// The agent's externally visible state.
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            parent: self.parent,
            kind: self.strategy.kind(),
            money: self.money,
            genotype: self.strategy.genotype().copied(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use ultimatum_types::{Genotype, StrategyKind};

    use super::*;
    use crate::adaptive::Adaptive;
    use crate::fixed::FixedBehavior;

    #[test]
    fn credit_accumulates_within_generation() {
        let mut agent = Agent::new(Strategy::Fixed(FixedBehavior::new(0.5)));
        agent.credit(0.25);
        agent.credit(0.5);
        assert_eq!(agent.money(), 0.75);
        agent.reset_money();
        assert_eq!(agent.money(), 0.0);
    }

    #[test]
    fn reproduce_tracks_lineage_and_starts_broke() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut parent = Agent::new(Strategy::Fixed(FixedBehavior::new(0.5)));
        parent.credit(3.0);
        let child = parent.reproduce(&mut rng);
        assert_eq!(child.parent(), Some(parent.id()));
        assert_ne!(child.id(), parent.id());
        assert_eq!(child.money(), 0.0);
        // The parent's payoff is untouched by reproduction.
        assert_eq!(parent.money(), 3.0);
    }

    #[test]
    fn reset_for_generation_keeps_money() {
        let mut agent = Agent::new(Strategy::Adaptive(Adaptive::new(Genotype::zero())));
        agent.credit(1.5);
        agent.reset_for_generation();
        assert_eq!(agent.money(), 1.5);
    }

    #[test]
    fn snapshot_carries_genotype_for_adaptive_agents() {
        let agent = Agent::new(Strategy::Adaptive(Adaptive::new(Genotype::zero())));
        let snapshot = agent.snapshot();
        assert_eq!(snapshot.kind, StrategyKind::Adaptive);
        assert_eq!(snapshot.genotype, Some(Genotype::zero()));

        let fixed = Agent::new(Strategy::Fixed(FixedBehavior::new(0.5)));
        assert!(fixed.snapshot().genotype.is_none());
    }
}
