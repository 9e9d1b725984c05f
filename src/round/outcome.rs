//! Notification structs handed to display collaborators.
//!
//! The engine exposes no wire format; a UI renders these values and holds
//! no rule logic of its own. [`RoundStart`] announces a fresh round,
//! [`RoundOutcome`] reports a resolved challenge with every cup revealed,
//! and [`GameOver`] names the winner.

use serde::{Deserialize, Serialize};

use crate::bid::Bid;
use crate::core::PlayerId;
use crate::dice::DiceValue;

/// Round-start notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStart {
    /// Round number, starting at 1.
    pub round: u32,

    /// Active players in turn order for this round.
    pub turn_order: Vec<PlayerId>,

    /// Whose turn it is to open the bidding.
    pub first_to_act: PlayerId,

    /// The Palifico player, if this round is Palifico.
    pub palifico: Option<PlayerId>,

    /// `(id, die count)` for every player, in seating order.
    pub dice_counts: Vec<(PlayerId, u8)>,
}

/// One player's dice, face up after a challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedCup {
    /// The cup's owner.
    pub player: PlayerId,

    /// The dice as rolled this round.
    pub dice: Vec<DiceValue>,
}

/// How a challenge resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Dudo failed: the table held at least the bid quantity, so the
    /// challenger loses a die.
    BidStands {
        /// The player who called Dudo.
        challenger: PlayerId,
    },

    /// Dudo succeeded: the bid overstated the count, so the bidder loses
    /// a die.
    BidBusted {
        /// The player who made the challenged bid.
        bidder: PlayerId,
    },

    /// Calza was exact: the caller gains a die, unless already at the cap
    /// (`gained` is false and the gain is discarded).
    CalzaExact {
        /// The player who called Calza.
        caller: PlayerId,
        /// Whether a die was actually added.
        gained: bool,
    },

    /// Calza missed: the caller loses a die.
    CalzaMissed {
        /// The player who called Calza.
        caller: PlayerId,
    },
}

/// A resolved round: the checked bid, the revealed table, and the one die
/// delta that was applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// The bid that was challenged or called exact.
    pub bid: Bid,

    /// Matching dice across all active cups, wilds included where they
    /// apply.
    pub total: u32,

    /// How the challenge resolved.
    pub resolution: Resolution,

    /// Every active player's dice, for display.
    pub revealed: Vec<RevealedCup>,

    /// The player eliminated by this round, if any.
    pub eliminated: Option<PlayerId>,

    /// The player whose drop to one die makes the next round Palifico,
    /// if any.
    pub palifico_triggered: Option<PlayerId>,
}

impl RoundOutcome {
    /// The player who lost a die, if anyone did.
    #[must_use]
    pub fn loser(&self) -> Option<PlayerId> {
        match self.resolution {
            Resolution::BidStands { challenger } => Some(challenger),
            Resolution::BidBusted { bidder } => Some(bidder),
            Resolution::CalzaMissed { caller } => Some(caller),
            Resolution::CalzaExact { .. } => None,
        }
    }

    /// The player who gained a die, if anyone did.
    #[must_use]
    pub fn gainer(&self) -> Option<PlayerId> {
        match self.resolution {
            Resolution::CalzaExact { caller, gained: true } => Some(caller),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.resolution {
            Resolution::BidStands { challenger } => write!(
                f,
                "{} on the table: bid {} stands, {} loses a die",
                self.total, self.bid, challenger
            ),
            Resolution::BidBusted { bidder } => write!(
                f,
                "only {} on the table: bid {} busts, {} loses a die",
                self.total, self.bid, bidder
            ),
            Resolution::CalzaExact { caller, gained: true } => write!(
                f,
                "exactly {} on the table: {} gains a die",
                self.total, caller
            ),
            Resolution::CalzaExact { caller, gained: false } => write!(
                f,
                "exactly {} on the table: {} is already at the cap",
                self.total, caller
            ),
            Resolution::CalzaMissed { caller } => write!(
                f,
                "{} on the table, not {}: {} loses a die",
                self.total,
                self.bid.quantity(),
                caller
            ),
        }
    }
}

/// Game-over notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    /// The sole player still holding dice.
    pub winner: PlayerId,

    /// Rounds played over the whole game.
    pub rounds_played: u32,
}
