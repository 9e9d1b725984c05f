//! One round of bidding and its resolution.
//!
//! ## State machine
//!
//! ```text
//! AwaitingOpeningBid -> AwaitingResponse (loop) -> Resolving -> RoundComplete
//! ```
//!
//! A round begins with every active cup rerolled and no bid on the table.
//! Each turn either raises the standing bid (staying in the response loop)
//! or challenges it, which resolves the round in one atomic step: count
//! the table, apply the single die delta, complete. Operations called
//! outside their phase fail with `InvalidTransition` and change nothing.
//!
//! ## Palifico
//!
//! A round started for a player newly reduced to one die locks the bid
//! face and turns off wild aces. The flag holds only if that player still
//! has exactly one die when the round starts.

mod action;
mod outcome;

pub use action::{ActionRecord, PlayerAction};
pub use outcome::{GameOver, Resolution, RevealedCup, RoundOutcome, RoundStart};

use serde::{Deserialize, Serialize};

use crate::bid::Bid;
use crate::core::{DieLoss, GameRng, PlayerId, Roster};
use crate::dice::DiceValue;
use crate::error::EngineError;

/// Where a round is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No bid yet; the starting player opens.
    AwaitingOpeningBid,
    /// A bid stands; the current player raises or challenges.
    AwaitingResponse,
    /// A challenge is being resolved. Transient: resolution is atomic, so
    /// this phase is never observable between calls.
    Resolving,
    /// The round is resolved; only a new round may follow.
    RoundComplete,
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self {
            RoundPhase::AwaitingOpeningBid => "awaiting the opening bid",
            RoundPhase::AwaitingResponse => "awaiting a response",
            RoundPhase::Resolving => "resolving",
            RoundPhase::RoundComplete => "round complete",
        };
        write!(f, "{}", phase)
    }
}

/// One round: turn order, the standing bid, and the Palifico flag.
///
/// Created fresh by [`RoundState::start`] each round and discarded once
/// resolved. The roster outlives it; the round only borrows it per call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Active players clockwise from the starting player. Fixed for the
    /// round: die counts only change at resolution.
    order: Vec<PlayerId>,
    /// Index into `order` of the player to act.
    turn: usize,
    phase: RoundPhase,
    current_bid: Option<Bid>,
    last_bidder: Option<PlayerId>,
    palifico: Option<PlayerId>,
    history: Vec<ActionRecord>,
}

impl RoundState {
    /// Begin a round: reroll every active cup, fix the turn order from
    /// `starting`, and clear the bid.
    ///
    /// `palifico_player` is the player whose drop to one die earned this
    /// round; the flag only takes effect if they still hold exactly one
    /// die now.
    pub fn start(
        roster: &mut Roster,
        rng: &mut GameRng,
        starting: PlayerId,
        palifico_player: Option<PlayerId>,
    ) -> Result<Self, EngineError> {
        if roster.active_count() < 2 {
            return Err(EngineError::state(
                "a round needs at least two active players",
            ));
        }
        if !roster[starting].is_active() {
            return Err(EngineError::state("the starting player is eliminated"));
        }

        roster.reroll_active(rng)?;

        let palifico = palifico_player
            .filter(|&p| roster[p].is_active() && roster[p].dice_count() == 1);

        Ok(Self {
            order: roster.active_order_from(starting),
            turn: 0,
            phase: RoundPhase::AwaitingOpeningBid,
            current_bid: None,
            last_bidder: None,
            palifico,
            history: Vec::new(),
        })
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// The standing bid, if any.
    #[must_use]
    pub fn current_bid(&self) -> Option<Bid> {
        self.current_bid
    }

    /// The player whose turn it is (after resolution: the player who
    /// resolved the round).
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.order[self.turn]
    }

    /// The player who made the standing bid.
    #[must_use]
    pub fn last_bidder(&self) -> Option<PlayerId> {
        self.last_bidder
    }

    /// Whether this round is Palifico.
    #[must_use]
    pub fn palifico_active(&self) -> bool {
        self.palifico.is_some()
    }

    /// The Palifico player, if this round is Palifico.
    #[must_use]
    pub fn palifico_player(&self) -> Option<PlayerId> {
        self.palifico
    }

    /// Active players clockwise from the round's starting player.
    #[must_use]
    pub fn turn_order(&self) -> &[PlayerId] {
        &self.order
    }

    /// Everything that has happened this round, in order.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Dispatch one turn action. Bids return `None`; challenges resolve
    /// the round and return the outcome.
    pub fn apply(
        &mut self,
        roster: &mut Roster,
        action: PlayerAction,
    ) -> Result<Option<RoundOutcome>, EngineError> {
        match action {
            PlayerAction::Bid(bid) => self.submit_bid(bid).map(|()| None),
            PlayerAction::Dudo => self.challenge_dudo(roster).map(Some),
            PlayerAction::Calza => self.claim_calza(roster).map(Some),
        }
    }

    /// Accept a bid from the current player and pass the turn clockwise.
    ///
    /// Fails with `InvalidBid` (state unchanged) if the bid does not raise
    /// the standing bid under the round's rules.
    pub fn submit_bid(&mut self, bid: Bid) -> Result<(), EngineError> {
        match self.phase {
            RoundPhase::AwaitingOpeningBid | RoundPhase::AwaitingResponse => {}
            phase => {
                return Err(EngineError::InvalidTransition {
                    op: "submit_bid",
                    phase,
                })
            }
        }

        if !bid.is_valid_raise(self.current_bid.as_ref(), self.palifico.is_some()) {
            return Err(EngineError::InvalidBid {
                bid,
                previous: self.current_bid,
            });
        }

        let bidder = self.current_player();
        self.current_bid = Some(bid);
        self.last_bidder = Some(bidder);
        self.record(bidder, PlayerAction::Bid(bid));
        self.turn = (self.turn + 1) % self.order.len();
        self.phase = RoundPhase::AwaitingResponse;
        Ok(())
    }

    /// The current player challenges the standing bid as an overstatement.
    ///
    /// Atomic: counts the table, takes a die from the loser, and completes
    /// the round in one call.
    pub fn challenge_dudo(&mut self, roster: &mut Roster) -> Result<RoundOutcome, EngineError> {
        let (bid, bidder) = self.require_standing_bid("challenge_dudo")?;
        let challenger = self.current_player();

        let (total, revealed) = reveal(roster, bid.face(), !self.palifico_active())?;

        self.phase = RoundPhase::Resolving;
        let (loser, resolution) = if total >= bid.quantity() {
            (challenger, Resolution::BidStands { challenger })
        } else {
            (bidder, Resolution::BidBusted { bidder })
        };
        let loss = roster.lose_die(loser)?;
        self.record(challenger, PlayerAction::Dudo);
        self.phase = RoundPhase::RoundComplete;

        Ok(RoundOutcome {
            bid,
            total,
            resolution,
            revealed,
            eliminated: (loss == DieLoss::Eliminated).then_some(loser),
            palifico_triggered: (loss == DieLoss::TriggersPalifico).then_some(loser),
        })
    }

    /// The current player claims the standing bid is exactly right.
    ///
    /// Exact: the caller gains a die (capped). Otherwise the caller loses
    /// one. Nobody else is ever affected.
    pub fn claim_calza(&mut self, roster: &mut Roster) -> Result<RoundOutcome, EngineError> {
        let (bid, _bidder) = self.require_standing_bid("claim_calza")?;
        let caller = self.current_player();

        let (total, revealed) = reveal(roster, bid.face(), !self.palifico_active())?;

        self.phase = RoundPhase::Resolving;
        let (resolution, loss) = if total == bid.quantity() {
            let gained = roster.gain_die(caller)?;
            (Resolution::CalzaExact { caller, gained }, None)
        } else {
            (Resolution::CalzaMissed { caller }, Some(roster.lose_die(caller)?))
        };
        self.record(caller, PlayerAction::Calza);
        self.phase = RoundPhase::RoundComplete;

        Ok(RoundOutcome {
            bid,
            total,
            resolution,
            revealed,
            eliminated: (loss == Some(DieLoss::Eliminated)).then_some(caller),
            palifico_triggered: (loss == Some(DieLoss::TriggersPalifico)).then_some(caller),
        })
    }

    /// Challenges need a standing bid and the response phase.
    fn require_standing_bid(&self, op: &'static str) -> Result<(Bid, PlayerId), EngineError> {
        if self.phase != RoundPhase::AwaitingResponse {
            return Err(EngineError::InvalidTransition {
                op,
                phase: self.phase,
            });
        }
        match (self.current_bid, self.last_bidder) {
            (Some(bid), Some(bidder)) => Ok((bid, bidder)),
            _ => Err(EngineError::InvalidTransition {
                op,
                phase: self.phase,
            }),
        }
    }

    fn record(&mut self, player: PlayerId, action: PlayerAction) {
        let sequence = self.history.len() as u32;
        self.history.push(ActionRecord {
            player,
            action,
            sequence,
        });
    }
}

/// Count `face` across all active cups and collect the reveal.
fn reveal(
    roster: &Roster,
    face: DiceValue,
    wild_ones_active: bool,
) -> Result<(u32, Vec<RevealedCup>), EngineError> {
    let mut total = 0;
    let mut revealed = Vec::new();
    for id in roster.active_ids() {
        let cup = roster[id].cup();
        total += cup.count_face(face, wild_ones_active)?;
        revealed.push(RevealedCup {
            player: id,
            dice: cup.dice().to_vec(),
        });
    }
    Ok((total, revealed))
}
