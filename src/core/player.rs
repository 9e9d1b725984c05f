//! Player identity, per-player dice bookkeeping, and the roster.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Player indices are 0-based and fixed at
//! game start; elimination never removes a player, so ids stay stable for
//! turn-order arithmetic.
//!
//! ## Roster
//!
//! The insertion-ordered player list backed by `Vec` for O(1) access.
//! Supports indexing by `PlayerId`, active-player iteration, and clockwise
//! successor lookup that skips eliminated players.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::core::config::GameConfig;
use crate::core::rng::GameRng;
use crate::dice::DiceCup;
use crate::error::EngineError;

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// What taking a die from a player changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DieLoss {
    /// The player still has more than one die; nothing else changes.
    Standard,
    /// The player dropped to exactly one die for the first time; their
    /// next round is Palifico.
    TriggersPalifico,
    /// The player lost their last die and is out of the game.
    Eliminated,
}

/// One participant: display name, die count, cup, and Palifico history.
///
/// Elimination is the derived condition `dice_count == 0` rather than a
/// stored flag, so it can never disagree with the die count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    dice_count: u8,
    cup: DiceCup,
    has_been_palifico: bool,
}

impl Player {
    /// Create a player with a full starting hand of dice.
    ///
    /// The cup starts empty; it is filled at the first round start.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, starting_dice: u8) -> Self {
        Self {
            id,
            name: name.into(),
            dice_count: starting_dice,
            cup: DiceCup::new(),
            has_been_palifico: false,
        }
    }

    /// This player's id.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current die count.
    #[must_use]
    pub const fn dice_count(&self) -> u8 {
        self.dice_count
    }

    /// Check whether this player is still in the game.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.dice_count > 0
    }

    /// Check whether this player has lost all dice.
    #[must_use]
    pub const fn is_eliminated(&self) -> bool {
        self.dice_count == 0
    }

    /// Whether this player has ever been reduced to exactly one die.
    ///
    /// Once set, dropping back to one die never triggers Palifico again.
    #[must_use]
    pub const fn has_been_palifico(&self) -> bool {
        self.has_been_palifico
    }

    /// This player's cup.
    #[must_use]
    pub fn cup(&self) -> &DiceCup {
        &self.cup
    }

    /// Reroll the cup to the current die count.
    pub(crate) fn reroll(&mut self, rng: &mut GameRng) -> Result<(), EngineError> {
        self.cup.reroll(self.dice_count, rng)
    }

    /// Take one die. Reports elimination and first-time Palifico triggers.
    pub(crate) fn lose_die(&mut self) -> Result<DieLoss, EngineError> {
        if self.dice_count == 0 {
            return Err(EngineError::state(
                "cannot take a die from an eliminated player",
            ));
        }
        self.dice_count -= 1;
        Ok(if self.dice_count == 0 {
            DieLoss::Eliminated
        } else if self.dice_count == 1 && !self.has_been_palifico {
            self.has_been_palifico = true;
            DieLoss::TriggersPalifico
        } else {
            DieLoss::Standard
        })
    }

    /// Add one die up to `cap`. Returns whether a die was actually added;
    /// gain past the cap is discarded, not banked.
    pub(crate) fn gain_die(&mut self, cap: u8) -> bool {
        if self.dice_count >= cap {
            return false;
        }
        self.dice_count += 1;
        true
    }

    /// Test-only: rig this player's dice to known faces.
    #[cfg(test)]
    pub(crate) fn set_dice(&mut self, faces: &[u8]) {
        self.dice_count = faces.len() as u8;
        self.cup.set_faces(faces);
    }
}

/// The insertion-ordered player list.
///
/// Created once at game start; players are never removed, only drained of
/// dice. Clockwise order is insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    die_cap: u8,
}

impl Roster {
    /// Create a roster from a validated game configuration.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let players = config
            .player_names()
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerId::new(i as u8), name.clone(), config.starting_dice()))
            .collect();
        Self {
            players,
            die_cap: config.die_cap(),
        }
    }

    /// Number of players, active or not.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The die cap in effect for Calza gains.
    #[must_use]
    pub const fn die_cap(&self) -> u8 {
        self.die_cap
    }

    /// Get a player by id.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Iterate over all players in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate over the ids of players still holding dice.
    pub fn active_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().filter(|p| p.is_active()).map(Player::id)
    }

    /// Number of players still holding dice.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Total dice across active players.
    #[must_use]
    pub fn dice_in_play(&self) -> u32 {
        self.players.iter().map(|p| u32::from(p.dice_count())).sum()
    }

    /// `(id, die count)` for every player, in insertion order.
    #[must_use]
    pub fn standings(&self) -> Vec<(PlayerId, u8)> {
        self.players.iter().map(|p| (p.id(), p.dice_count())).collect()
    }

    /// The next active player clockwise after `id`, skipping eliminated
    /// players. `None` only when nobody holds dice.
    #[must_use]
    pub fn next_active_after(&self, id: PlayerId) -> Option<PlayerId> {
        let len = self.players.len();
        (1..=len)
            .map(|step| (id.index() + step) % len)
            .find(|&idx| self.players[idx].is_active())
            .map(|idx| self.players[idx].id())
    }

    /// Active player ids clockwise, beginning at `start`.
    #[must_use]
    pub fn active_order_from(&self, start: PlayerId) -> Vec<PlayerId> {
        let len = self.players.len();
        (0..len)
            .map(|step| (start.index() + step) % len)
            .filter(|&idx| self.players[idx].is_active())
            .map(|idx| self.players[idx].id())
            .collect()
    }

    /// Reroll every active player's cup.
    pub(crate) fn reroll_active(&mut self, rng: &mut GameRng) -> Result<(), EngineError> {
        for player in self.players.iter_mut().filter(|p| p.is_active()) {
            player.reroll(rng)?;
        }
        Ok(())
    }

    /// Take one die from a player.
    pub(crate) fn lose_die(&mut self, id: PlayerId) -> Result<DieLoss, EngineError> {
        self.players[id.index()].lose_die()
    }

    /// Test-only: mutable access for rigging cups in scenario tests.
    #[cfg(test)]
    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Give a player one die, respecting the cap. Returns whether a die
    /// was actually added.
    pub(crate) fn gain_die(&mut self, id: PlayerId) -> Result<bool, EngineError> {
        let cap = self.die_cap;
        let player = &mut self.players[id.index()];
        if player.is_eliminated() {
            return Err(EngineError::state(
                "cannot give a die to an eliminated player",
            ));
        }
        Ok(player.gain_die(cap))
    }
}

impl Index<PlayerId> for Roster {
    type Output = Player;

    fn index(&self, id: PlayerId) -> &Self::Output {
        self.get(id)
    }
}
