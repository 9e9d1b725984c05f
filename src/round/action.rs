//! Turn actions and the per-round history record.
//!
//! Every turn is one of three moves. Modeling them as a single tagged
//! variant keeps the branch between bidding and challenging in one
//! dispatch point instead of scattered through the driving code.

use serde::{Deserialize, Serialize};

use crate::bid::Bid;
use crate::core::PlayerId;

/// One player's move on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Raise (or open) with a bid.
    Bid(Bid),
    /// Challenge the standing bid as an overstatement.
    Dudo,
    /// Claim the standing bid is exactly right.
    Calza,
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerAction::Bid(bid) => write!(f, "bids {}", bid),
            PlayerAction::Dudo => write!(f, "calls Dudo"),
            PlayerAction::Calza => write!(f, "calls Calza"),
        }
    }
}

/// A recorded action with its position in the round.
///
/// Used for display and for replay-style assertions in tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: PlayerAction,

    /// Position within the round (0-based).
    pub sequence: u32,
}
