//! Game configuration types.
//!
//! A game configures the engine at startup by providing:
//! - `SeatConfig`: one entry per seat (display name, human flag, optional
//!   persona blurb for AI prompt flavor)
//! - `GameConfig`: the ordered seat list plus round settings
//!
//! Seat order is turn order. The engine never hardcodes the table size:
//! three seats is the classic setup, anything from 3 to 8 works.

use serde::{Deserialize, Serialize};

/// Smallest playable table.
pub const MIN_PLAYERS: usize = 3;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 8;

/// Configuration for a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Display name. Renameable later without touching game state.
    pub name: String,

    /// Is this seat controlled by the human player?
    pub human: bool,

    /// Optional style blurb woven into AI prompts for this seat.
    pub persona: Option<String>,
}

impl SeatConfig {
    /// Create the human seat.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            human: true,
            persona: None,
        }
    }

    /// Create an AI seat.
    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            human: false,
            persona: None,
        }
    }

    /// Attach a persona blurb (AI seats only, ignored for the human).
    #[must_use]
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }
}

/// Complete game configuration.
///
/// ```
/// use impostor::core::{GameConfig, SeatConfig};
///
/// let config = GameConfig::new(vec![
///     SeatConfig::human("You"),
///     SeatConfig::ai("Julian"),
///     SeatConfig::ai("Sofia"),
/// ])
/// .with_clue_rounds(3);
///
/// assert_eq!(config.player_count(), 3);
/// assert_eq!(config.clue_rounds, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Ordered seats. Exactly one must be human.
    pub seats: Vec<SeatConfig>,

    /// Clue passes around the table before voting opens.
    pub clue_rounds: u8,
}

impl GameConfig {
    /// Create a configuration from an ordered seat list.
    ///
    /// Panics if the seat count is outside 3..=8 or the human count is
    /// not exactly one; both are programming errors, not runtime input.
    pub fn new(seats: Vec<SeatConfig>) -> Self {
        assert!(seats.len() >= MIN_PLAYERS, "Need at least 3 seats");
        assert!(seats.len() <= MAX_PLAYERS, "At most 8 seats supported");
        let humans = seats.iter().filter(|s| s.human).count();
        assert!(humans == 1, "Exactly one seat must be human");

        Self {
            seats,
            clue_rounds: 2,
        }
    }

    /// The classic three-seat table: one human and two AI personas.
    #[must_use]
    pub fn classic() -> Self {
        Self::new(vec![
            SeatConfig::human("You"),
            SeatConfig::ai("Julian")
                .with_persona("a warm neighborhood baker, gentle and a little nostalgic"),
            SeatConfig::ai("Sofia")
                .with_persona("a sharp street artist, cool and observant"),
        ])
    }

    /// Set how many clue passes precede voting.
    #[must_use]
    pub fn with_clue_rounds(mut self, rounds: u8) -> Self {
        assert!(rounds >= 1, "Need at least 1 clue round");
        self.clue_rounds = rounds;
        self
    }

    /// Number of seats at the table.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_seats() -> Vec<SeatConfig> {
        vec![
            SeatConfig::human("A"),
            SeatConfig::ai("B"),
            SeatConfig::ai("C"),
        ]
    }

    #[test]
    fn test_seat_config_builder() {
        let seat = SeatConfig::ai("Julian").with_persona("a baker");

        assert_eq!(seat.name, "Julian");
        assert!(!seat.human);
        assert_eq!(seat.persona.as_deref(), Some("a baker"));

        let human = SeatConfig::human("You");
        assert!(human.human);
        assert!(human.persona.is_none());
    }

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::new(three_seats());

        assert_eq!(config.player_count(), 3);
        assert_eq!(config.clue_rounds, 2);
    }

    #[test]
    fn test_classic_table() {
        let config = GameConfig::classic();

        assert_eq!(config.player_count(), 3);
        assert!(config.seats[0].human);
        assert!(!config.seats[1].human);
        assert!(!config.seats[2].human);
        assert!(config.seats[1].persona.is_some());
    }

    #[test]
    fn test_with_clue_rounds() {
        let config = GameConfig::new(three_seats()).with_clue_rounds(4);
        assert_eq!(config.clue_rounds, 4);
    }

    #[test]
    #[should_panic(expected = "Need at least 3 seats")]
    fn test_too_few_seats() {
        GameConfig::new(vec![SeatConfig::human("A"), SeatConfig::ai("B")]);
    }

    #[test]
    #[should_panic(expected = "Exactly one seat must be human")]
    fn test_two_humans() {
        GameConfig::new(vec![
            SeatConfig::human("A"),
            SeatConfig::human("B"),
            SeatConfig::ai("C"),
        ]);
    }

    #[test]
    #[should_panic(expected = "Exactly one seat must be human")]
    fn test_no_humans() {
        GameConfig::new(vec![
            SeatConfig::ai("A"),
            SeatConfig::ai("B"),
            SeatConfig::ai("C"),
        ]);
    }

    #[test]
    #[should_panic(expected = "Need at least 1 clue round")]
    fn test_zero_rounds() {
        let _ = GameConfig::new(three_seats()).with_clue_rounds(0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = GameConfig::classic().with_clue_rounds(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
