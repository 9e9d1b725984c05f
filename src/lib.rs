//! # perudo-engine
//!
//! A rules engine for Perudo (Liar's Dice): per-round dice state, bid
//! ordering under the wild-one and Palifico rules, Dudo/Calza resolution,
//! and the die bookkeeping that changes the rules of future rounds.
//!
//! ## Design Principles
//!
//! 1. **Rules only**: No terminal, prompting, or persistence in here.
//!    Collaborators drive the engine through its operations and render the
//!    value structs it returns.
//!
//! 2. **Deterministic**: Dice come from one seeded source; the same seed
//!    and actions always produce the same game.
//!
//! 3. **Failures are pure reports**: A rejected operation mutates nothing.
//!    Recoverable rejections (`InvalidBid`) are re-prompted by the caller;
//!    everything else is a contract violation and is surfaced as-is.
//!
//! ## Modules
//!
//! - `core`: Player identity, the roster, configuration, seeded RNG
//! - `dice`: Face values and per-player cups with wild-aware counting
//! - `bid`: Bids and the raise-ordering rules
//! - `round`: One round's state machine, actions, and resolution
//! - `engine`: Game lifecycle and the turn-input seam
//! - `error`: The engine error taxonomy
//!
//! ## Example
//!
//! ```
//! use perudo_engine::{Bid, DiceValue, GameConfig, GameEngine};
//!
//! let config = GameConfig::new(vec!["Ana".into(), "Bo".into()]);
//! let mut engine = GameEngine::new(config, 42);
//!
//! engine.start_round().unwrap();
//!
//! let twos = DiceValue::new(2).unwrap();
//! engine.submit_bid(Bid::new(1, twos).unwrap()).unwrap();
//! let outcome = engine.challenge_dudo().unwrap();
//!
//! // One die delta was applied and every cup is face up in the outcome.
//! assert_eq!(outcome.revealed.len(), 2);
//! ```

pub mod bid;
pub mod core;
pub mod dice;
pub mod engine;
pub mod error;
pub mod round;

// Re-export commonly used types
pub use crate::bid::Bid;
pub use crate::core::{DieLoss, GameConfig, GameRng, GameRngState, Player, PlayerId, Roster};
pub use crate::dice::{DiceCup, DiceValue};
pub use crate::engine::{GameEngine, TurnInput, TurnView};
pub use crate::error::EngineError;
pub use crate::round::{
    ActionRecord, GameOver, PlayerAction, Resolution, RevealedCup, RoundOutcome, RoundPhase,
    RoundStart, RoundState,
};
