//! Dice values and per-player dice cups.
//!
//! ## DiceValue
//!
//! Checked face newtype: only values in `1..=6` are representable. Face 1
//! (the "ace") is wild in standard rounds and counts toward every other
//! face's total, but never during Palifico; counting aces themselves
//! never adds wilds on top.
//!
//! ## DiceCup
//!
//! One player's current dice, rerolled at the start of every round the
//! player participates in. Storage is inline (`SmallVec`, max five dice).
//! The order of dice carries no meaning beyond display.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::GameRng;
use crate::error::EngineError;

/// A single die face in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiceValue(u8);

impl DiceValue {
    /// The wild face.
    pub const ACE: DiceValue = DiceValue(1);

    /// Create a face value, or `None` if `raw` is outside `1..=6`.
    #[must_use]
    pub const fn new(raw: u8) -> Option<Self> {
        if raw >= 1 && raw <= 6 {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Get the raw face value (1-6).
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check whether this is the wild face.
    #[must_use]
    pub const fn is_ace(self) -> bool {
        self.0 == 1
    }

    /// Roll a fresh face from the game's dice source.
    #[must_use]
    pub fn roll(rng: &mut GameRng) -> Self {
        // roll_face is bounded to 1..=6.
        Self(rng.roll_face())
    }

    /// Iterate over all six faces in ascending order.
    pub fn all() -> impl Iterator<Item = DiceValue> {
        (1..=6).map(DiceValue)
    }
}

impl std::fmt::Display for DiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One player's dice.
///
/// The cup starts empty and is filled by [`DiceCup::reroll`] at each round
/// start; its size always equals the owner's die count after a reroll.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceCup {
    dice: SmallVec<[DiceValue; 5]>,
}

impl DiceCup {
    /// Create an empty cup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all dice with `count` freshly drawn values.
    ///
    /// Fails with `InvalidState` for a zero count: an eliminated player has
    /// no cup to roll.
    pub fn reroll(&mut self, count: u8, rng: &mut GameRng) -> Result<(), EngineError> {
        if count == 0 {
            return Err(EngineError::state("cannot reroll an empty dice cup"));
        }
        self.dice.clear();
        for _ in 0..count {
            self.dice.push(DiceValue::roll(rng));
        }
        Ok(())
    }

    /// Count dice matching `face`.
    ///
    /// With `wild_ones_active` and a non-ace `face`, aces count toward the
    /// total as wilds. Counting aces themselves only ever counts actual
    /// aces.
    ///
    /// Fails with `InvalidState` on an empty cup: an eliminated player has
    /// no cup to query.
    pub fn count_face(&self, face: DiceValue, wild_ones_active: bool) -> Result<u32, EngineError> {
        if self.dice.is_empty() {
            return Err(EngineError::state("cannot query an empty dice cup"));
        }
        let mut count = 0u32;
        for &die in &self.dice {
            if die == face || (wild_ones_active && !face.is_ace() && die.is_ace()) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// The current dice, in display order.
    #[must_use]
    pub fn dice(&self) -> &[DiceValue] {
        &self.dice
    }

    /// Number of dice currently in the cup.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// Check whether the cup holds no dice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Test-only: overwrite the cup with known faces.
    #[cfg(test)]
    pub(crate) fn set_faces(&mut self, faces: &[u8]) {
        self.dice = faces
            .iter()
            .map(|&f| DiceValue::new(f).expect("test faces are 1-6"))
            .collect();
    }
}
