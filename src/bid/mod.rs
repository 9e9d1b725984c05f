//! Bids and the bid-ordering rules.
//!
//! A bid claims that at least `quantity` dice across all active cups show
//! `face` (aces counting as wilds outside Palifico). Bids are immutable
//! once made; each turn either raises the standing bid or challenges it.
//!
//! ## Ordering
//!
//! [`Bid::is_valid_raise`] encodes the full lattice:
//!
//! - Opening bid: anything goes.
//! - Same face: quantity must strictly increase.
//! - Onto aces: quantity must be at least half the previous, rounded up.
//! - Away from aces: quantity must be at least double the previous plus one.
//! - Any other face change: quantity must strictly increase; the face value
//!   itself does not rank.
//! - Palifico: the face is locked, quantity must strictly increase.

use serde::{Deserialize, Serialize};

use crate::dice::DiceValue;

/// An immutable quantity-and-face claim.
///
/// ```
/// use perudo_engine::{Bid, DiceValue};
///
/// let threes = DiceValue::new(3).unwrap();
/// let bid = Bid::new(4, threes).unwrap();
/// assert_eq!(bid.quantity(), 4);
/// assert_eq!(bid.face(), threes);
///
/// // Zero-quantity bids are unrepresentable.
/// assert!(Bid::new(0, threes).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    quantity: u32,
    face: DiceValue,
}

impl Bid {
    /// Create a bid, or `None` for a zero quantity.
    #[must_use]
    pub fn new(quantity: u32, face: DiceValue) -> Option<Self> {
        if quantity == 0 {
            return None;
        }
        Some(Self { quantity, face })
    }

    /// Number of dice claimed.
    #[must_use]
    pub const fn quantity(self) -> u32 {
        self.quantity
    }

    /// Face claimed.
    #[must_use]
    pub const fn face(self) -> DiceValue {
        self.face
    }

    /// Check whether this bid legally raises `previous`.
    ///
    /// An opening bid (`previous` is `None`) is always valid. During
    /// Palifico the face is locked and only the quantity may grow. The
    /// engine never corrects an invalid bid; callers reject it and
    /// re-prompt.
    #[must_use]
    pub fn is_valid_raise(self, previous: Option<&Bid>, palifico_active: bool) -> bool {
        let Some(prev) = previous else {
            return true;
        };

        if palifico_active {
            return self.face == prev.face && self.quantity > prev.quantity;
        }

        if self.face.is_ace() != prev.face.is_ace() {
            if self.face.is_ace() {
                // Dropping onto aces halves the floor, rounded up.
                self.quantity >= prev.quantity.div_ceil(2)
            } else {
                // Leaving aces doubles it, plus one.
                self.quantity >= prev.quantity * 2 + 1
            }
        } else {
            // Same face, or a sideways face change: quantity alone ranks.
            self.quantity > prev.quantity
        }
    }
}

impl std::fmt::Display for Bid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}s", self.quantity, self.face)
    }
}
