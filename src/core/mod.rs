//! Core types: player identity, the roster, configuration, and the
//! deterministic dice source.

pub mod config;
pub mod player;
pub mod rng;

pub use config::{GameConfig, DEFAULT_DICE};
pub use player::{DieLoss, Player, PlayerId, Roster};
pub use rng::{GameRng, GameRngState};
