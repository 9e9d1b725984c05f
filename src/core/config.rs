//! Game configuration.
//!
//! A `GameConfig` fixes everything about a game before the first roll:
//! who plays (and in what clockwise order), how many dice each player
//! starts with, and the cap Calza gains may never exceed. The engine never
//! hardcodes these; the defaults match the classic table game.

use serde::{Deserialize, Serialize};

/// Default and maximum dice per player.
pub const DEFAULT_DICE: u8 = 5;

/// Complete game configuration.
///
/// ```
/// use perudo_engine::core::GameConfig;
///
/// let config = GameConfig::new(vec!["Ana".into(), "Bo".into()])
///     .with_starting_dice(3);
///
/// assert_eq!(config.player_count(), 2);
/// assert_eq!(config.starting_dice(), 3);
/// assert_eq!(config.die_cap(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player display names, in clockwise seating order.
    player_names: Vec<String>,

    /// Dice each player starts with.
    starting_dice: u8,

    /// Maximum dice a player may hold (Calza gains past this are lost).
    die_cap: u8,
}

impl GameConfig {
    /// Create a configuration for the given players with default dice.
    #[must_use]
    pub fn new(player_names: Vec<String>) -> Self {
        assert!(
            (2..=6).contains(&player_names.len()),
            "Player count must be 2-6"
        );

        Self {
            player_names,
            starting_dice: DEFAULT_DICE,
            die_cap: DEFAULT_DICE,
        }
    }

    /// Set the starting die count per player.
    #[must_use]
    pub fn with_starting_dice(mut self, dice: u8) -> Self {
        assert!(dice >= 1, "Players must start with at least one die");
        assert!(dice <= self.die_cap, "Starting dice cannot exceed the cap");
        self.starting_dice = dice;
        self
    }

    /// Set the die cap for Calza gains.
    #[must_use]
    pub fn with_die_cap(mut self, cap: u8) -> Self {
        assert!(cap >= self.starting_dice, "Cap cannot be below starting dice");
        self.die_cap = cap;
        self
    }

    /// Player display names in seating order.
    #[must_use]
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    /// Dice each player starts with.
    #[must_use]
    pub const fn starting_dice(&self) -> u8 {
        self.starting_dice
    }

    /// Maximum dice a player may hold.
    #[must_use]
    pub const fn die_cap(&self) -> u8 {
        self.die_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{}", i)).collect()
    }

    #[test]
    fn test_defaults() {
        let config = GameConfig::new(names(4));

        assert_eq!(config.player_count(), 4);
        assert_eq!(config.starting_dice(), 5);
        assert_eq!(config.die_cap(), 5);
        assert_eq!(config.player_names()[2], "P2");
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(names(2))
            .with_die_cap(6)
            .with_starting_dice(3);

        assert_eq!(config.starting_dice(), 3);
        assert_eq!(config.die_cap(), 6);
    }

    #[test]
    #[should_panic(expected = "Player count must be 2-6")]
    fn test_too_few_players() {
        GameConfig::new(names(1));
    }

    #[test]
    #[should_panic(expected = "Player count must be 2-6")]
    fn test_too_many_players() {
        GameConfig::new(names(7));
    }

    #[test]
    #[should_panic(expected = "Players must start with at least one die")]
    fn test_zero_starting_dice() {
        GameConfig::new(names(2)).with_starting_dice(0);
    }

    #[test]
    #[should_panic(expected = "Starting dice cannot exceed the cap")]
    fn test_starting_dice_over_cap() {
        GameConfig::new(names(2)).with_starting_dice(6);
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::new(names(3)).with_starting_dice(2);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
