//! Game outcomes and the sliding history window of adaptive agents.
//!
//! An adaptive agent conditions its next offer and acceptance threshold on
//! the outcomes of the two most recent games it took part in (as either
//! role). That window is modelled as [`HistoryKey`], an enum with exactly
//! the seven reachable states: each slot is conceptually one of
//! *unknown* / *accepted* / *rejected*, but a slot can only be unknown
//! before the agent's first games, so `(accepted, unknown)` and
//! `(rejected, unknown)` never occur. Making the key a closed enum puts
//! the genotype key-set invariant in the type system -- there is no way
//! to construct an out-of-domain key, and no way for mutation to add or
//! remove one.

use serde::{Deserialize, Serialize};

/// The result of a single ultimatum game, as observed by both participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The recipient accepted the offer; the pot was split.
    Accepted,
    /// The recipient rejected the offer; nobody was paid.
    Rejected,
}

/// Two-slot sliding window over an agent's most recent game outcomes.
///
/// The first slot is the older observation. [`HistoryKey::advance`]
/// shifts the window: the old second slot becomes the new first slot and
/// the just-observed [`Outcome`] fills the second slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKey {
    /// No games observed yet (the per-generation starting state).
    #[default]
    UnknownUnknown,
    /// One game observed; it was accepted.
    UnknownAccepted,
    /// One game observed; it was rejected.
    UnknownRejected,
    /// Two accepts in a row.
    AcceptedAccepted,
    /// An accept followed by a reject.
    AcceptedRejected,
    /// A reject followed by an accept.
    RejectedAccepted,
    /// Two rejects in a row.
    RejectedRejected,
}

impl HistoryKey {
    /// All keys in the canonical order used to lay out genotype
    /// coefficient tables. The order is fixed for the lifetime of the
    /// project; serialized genotypes depend on it.
    pub const ALL: [Self; 7] = [
        Self::UnknownUnknown,
        Self::UnknownAccepted,
        Self::UnknownRejected,
        Self::AcceptedAccepted,
        Self::AcceptedRejected,
        Self::RejectedAccepted,
        Self::RejectedRejected,
    ];

    /// Position of this key within [`HistoryKey::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::UnknownUnknown => 0,
            Self::UnknownAccepted => 1,
            Self::UnknownRejected => 2,
            Self::AcceptedAccepted => 3,
            Self::AcceptedRejected => 4,
            Self::RejectedAccepted => 5,
            Self::RejectedRejected => 6,
        }
    }

    /// Shift the window after a game: the old second slot becomes the
    /// first, and `outcome` becomes the second.
    pub const fn advance(self, outcome: Outcome) -> Self {
        match (self.newest(), outcome) {
            (None, Outcome::Accepted) => Self::UnknownAccepted,
            (None, Outcome::Rejected) => Self::UnknownRejected,
            (Some(Outcome::Accepted), Outcome::Accepted) => Self::AcceptedAccepted,
            (Some(Outcome::Accepted), Outcome::Rejected) => Self::AcceptedRejected,
            (Some(Outcome::Rejected), Outcome::Accepted) => Self::RejectedAccepted,
            (Some(Outcome::Rejected), Outcome::Rejected) => Self::RejectedRejected,
        }
    }

    /// The most recent observation in the window, if any.
    pub const fn newest(self) -> Option<Outcome> {
        match self {
            Self::UnknownUnknown => None,
            Self::UnknownAccepted | Self::AcceptedAccepted | Self::RejectedAccepted => {
                Some(Outcome::Accepted)
            }
            Self::UnknownRejected | Self::AcceptedRejected | Self::RejectedRejected => {
                Some(Outcome::Rejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_canonical_order() {
        for (position, key) in HistoryKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), position);
        }
    }

    #[test]
    fn advance_follows_sliding_window() {
        // The sequence accept, reject, accept must walk the window
        // through (unknown, accept), (accept, reject), (reject, accept).
        let start = HistoryKey::UnknownUnknown;
        let first = start.advance(Outcome::Accepted);
        assert_eq!(first, HistoryKey::UnknownAccepted);
        let second = first.advance(Outcome::Rejected);
        assert_eq!(second, HistoryKey::AcceptedRejected);
        let third = second.advance(Outcome::Accepted);
        assert_eq!(third, HistoryKey::RejectedAccepted);
    }

    #[test]
    fn advance_never_reaches_unknown_second_slot() {
        // After any game the second slot is a real outcome, so the
        // starting state is unreachable from any advance.
        for key in HistoryKey::ALL {
            for outcome in [Outcome::Accepted, Outcome::Rejected] {
                assert_ne!(key.advance(outcome), HistoryKey::UnknownUnknown);
            }
        }
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&HistoryKey::AcceptedRejected).ok();
        assert_eq!(json.as_deref(), Some("\"accepted_rejected\""));
    }
}
