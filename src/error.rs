//! Engine error taxonomy.
//!
//! Three failure classes, all pure reports: state before a failed call
//! equals state after.
//!
//! - [`EngineError::InvalidBid`]: a bid failed the ordering rules.
//!   Recoverable; the turn-input collaborator re-prompts.
//! - [`EngineError::InvalidTransition`]: an operation was called in the
//!   wrong round phase. A contract violation in the driving code, surfaced
//!   rather than ignored.
//! - [`EngineError::InvalidState`]: a query that makes no sense right now,
//!   such as reading an eliminated player's cup or asking for the winner
//!   before the game is over.

use crate::bid::Bid;
use crate::round::RoundPhase;

/// Errors surfaced by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The bid does not legally raise the current bid. The caller must
    /// re-prompt; the engine never corrects a bid on its own.
    #[error("bid {bid} is not a legal raise")]
    InvalidBid {
        /// The rejected bid.
        bid: Bid,
        /// The bid it failed against (`None` for an opening bid, which can
        /// only be rejected under rules that never fire there).
        previous: Option<Bid>,
    },

    /// The operation is not valid in the round's current phase.
    #[error("{op} is not valid while {phase}")]
    InvalidTransition {
        /// The operation that was attempted.
        op: &'static str,
        /// The phase the round was in.
        phase: RoundPhase,
    },

    /// The engine was asked something its current state cannot answer.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidState`] with a message.
    pub(crate) fn state(msg: impl Into<String>) -> Self {
        EngineError::InvalidState(msg.into())
    }
}
