//! One offerer→recipient ultimatum transaction.
//!
//! The protocol is three fixed steps: the offerer names a fraction of
//! the unit pot, the recipient accepts or rejects it, and settlement
//! moves money exactly once, after the decision. Participants never
//! mutate each other's internals; the protocol applies the outcome to
//! both strategies afterwards, which is what slides the adaptive
//! history windows.

use rand::Rng;
use tracing::trace;

use ultimatum_agents::Agent;
use ultimatum_types::Outcome;

/// The record of a single completed game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamePlayed {
    /// The fraction of the pot that was offered.
    pub offer: f64,
    /// Whether the recipient accepted.
    pub accepted: bool,
}

impl GamePlayed {
    /// The outcome both participants observed.
    pub const fn outcome(&self) -> Outcome {
        if self.accepted {
            Outcome::Accepted
        } else {
            Outcome::Rejected
        }
    }
}

/// Play one game between an offerer and a recipient.
///
/// Side effects: advances both strategies' internal decision state,
/// and on acceptance credits `offer` to the recipient and `1 - offer`
/// to the offerer. On rejection no money moves. Either way both
/// participants observe the outcome.
pub fn play_game(offerer: &mut Agent, recipient: &mut Agent, rng: &mut impl Rng) -> GamePlayed {
    let offer = offerer.strategy_mut().decide_offer(rng);
    let accepted = recipient.strategy_mut().decide_accept(offer, rng);

    // Settlement: exactly once, after the accept decision.
    if accepted {
        recipient.credit(offer);
        offerer.credit(1.0 - offer);
    }

    let game = GamePlayed { offer, accepted };
    offerer.strategy_mut().observe_outcome(game.outcome());
    recipient.strategy_mut().observe_outcome(game.outcome());

    trace!(offer, accepted, "game settled");
    game
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::unreachable,
    clippy::arithmetic_side_effects
)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use ultimatum_agents::{Adaptive, Agent, FixedBehavior, RandomPlay, Strategy};
    use ultimatum_types::{Coefficients, Genotype, HistoryKey};

    use super::*;

    fn fixed_agent(offer: f64, threshold: f64) -> Agent {
        Agent::new(Strategy::Fixed(FixedBehavior::with_threshold(
            offer, threshold,
        )))
    }

    #[test]
    fn accepted_game_splits_the_whole_pot() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut offerer = fixed_agent(0.6, 0.5);
        let mut recipient = fixed_agent(0.3, 0.5);

        let game = play_game(&mut offerer, &mut recipient, &mut rng);
        assert!(game.accepted);
        assert_eq!(game.offer, 0.6);
        let delta = offerer.money() + recipient.money();
        assert!((delta - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejected_game_moves_no_money() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut offerer = fixed_agent(0.3, 0.5);
        let mut recipient = fixed_agent(0.6, 0.5);

        let game = play_game(&mut offerer, &mut recipient, &mut rng);
        assert!(!game.accepted);
        assert_eq!(offerer.money(), 0.0);
        assert_eq!(recipient.money(), 0.0);
    }

    #[test]
    fn two_fixed_agents_play_both_roles() {
        // The canonical scenario: A offers 0.6 (accepted against B's 0.5
        // threshold), B offers 0.3 (rejected against A's). Final money:
        // A = 0.4, B = 0.6.
        let mut rng = SmallRng::seed_from_u64(1);
        let mut a = fixed_agent(0.6, 0.5);
        let mut b = fixed_agent(0.3, 0.5);

        let first = play_game(&mut a, &mut b, &mut rng);
        assert!(first.accepted);
        let second = play_game(&mut b, &mut a, &mut rng);
        assert!(!second.accepted);

        assert!((a.money() - 0.4).abs() < 1e-12);
        assert!((b.money() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn money_conservation_holds_for_random_players() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut a = Agent::new(Strategy::Random(RandomPlay::default()));
        let mut b = Agent::new(Strategy::Random(RandomPlay::default()));

        let mut games_accepted = 0_u32;
        for round in 0..100_u32 {
            let before = a.money() + b.money();
            let game = if round % 2 == 0 {
                play_game(&mut a, &mut b, &mut rng)
            } else {
                play_game(&mut b, &mut a, &mut rng)
            };
            let delta = a.money() + b.money() - before;
            if game.accepted {
                games_accepted += 1;
                assert!((delta - 1.0).abs() < 1e-9);
            } else {
                assert!(delta.abs() < 1e-9);
            }
        }
        // With p = 0.5 over 100 games, both outcomes occur.
        assert!(games_accepted > 0);
        assert!(games_accepted < 100);
    }

    #[test]
    fn both_adaptive_participants_observe_the_outcome() {
        let mut rng = SmallRng::seed_from_u64(2);
        // Offer coefficients at zero keep the offer at 0.5; accept
        // coefficients at zero keep the threshold at 0.5, so 0.5 >= 0.5
        // is accepted.
        let genotype = Genotype::new(Coefficients::zero(), Coefficients::zero());
        let mut a = Agent::new(Strategy::Adaptive(Adaptive::new(genotype)));
        let mut b = Agent::new(Strategy::Adaptive(Adaptive::new(genotype)));

        let game = play_game(&mut a, &mut b, &mut rng);
        assert!(game.accepted);

        for agent in [&a, &b] {
            if let Strategy::Adaptive(adaptive) = agent.strategy() {
                assert_eq!(adaptive.history(), HistoryKey::UnknownAccepted);
            } else {
                unreachable!("both agents are adaptive");
            }
        }
    }
}
