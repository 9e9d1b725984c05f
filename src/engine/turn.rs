//! The turn-input seam.
//!
//! The engine owns the rules; choosing an action is somebody else's job.
//! A [`TurnInput`] implementation is handed a [`TurnView`] snapshot each
//! prompt and answers with a [`PlayerAction`]. It is also where waiting
//! happens: a terminal UI blocks on the keyboard here, the engine never
//! does. Re-prompting after a rejected bid is this collaborator's
//! responsibility; the engine only reports the rejection.

use serde::{Deserialize, Serialize};

use crate::bid::Bid;
use crate::core::PlayerId;
use crate::dice::DiceValue;
use crate::error::EngineError;
use crate::round::{PlayerAction, RoundOutcome, RoundStart};

/// What the acting player may see when choosing an action.
///
/// Other players' rolled dice are never in the view; they surface only in
/// a [`RoundOutcome`] reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnView {
    /// Round number, starting at 1.
    pub round: u32,

    /// The player to act.
    pub player: PlayerId,

    /// That player's display name.
    pub player_name: String,

    /// That player's own dice as rolled this round.
    pub own_dice: Vec<DiceValue>,

    /// The standing bid, if any.
    pub current_bid: Option<Bid>,

    /// The Palifico player, if this round is Palifico.
    pub palifico: Option<PlayerId>,

    /// Whether this is the opening bid of the round (challenges are not
    /// yet available).
    pub opening: bool,

    /// `(id, die count)` for every player, in seating order. Die counts
    /// are public knowledge at the table.
    pub dice_counts: Vec<(PlayerId, u8)>,

    /// Total dice across active players.
    pub dice_in_play: u32,
}

/// Chooses actions for whoever's turn it is.
///
/// One implementation can serve a whole table (the original game passes a
/// single terminal between players), or compose several per-seat sources.
/// The notification hooks default to no-ops so a headless driver
/// implements only [`TurnInput::choose_action`].
pub trait TurnInput {
    /// Choose the acting player's action for this turn.
    fn choose_action(&mut self, view: &TurnView) -> PlayerAction;

    /// A submitted bid was rejected; the same player will be prompted
    /// again.
    fn bid_rejected(&mut self, bid: Bid, error: &EngineError) {
        let _ = (bid, error);
    }

    /// A new round has started.
    fn round_started(&mut self, start: &RoundStart) {
        let _ = start;
    }

    /// The round resolved; all cups are revealed in the outcome.
    fn round_resolved(&mut self, outcome: &RoundOutcome) {
        let _ = outcome;
    }
}
