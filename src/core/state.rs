//! Game state: the single source of truth.
//!
//! ## Phase
//!
//! The fixed lifecycle of a game:
//! `Lobby → Reveal → Playing → Voting → (GameOver | Tie)`, with
//! `reset_game` returning to `Lobby` from anywhere.
//!
//! ## GameState
//!
//! Everything a UI needs is derivable from this one value:
//! - Phase, whose turn it is, current clue round
//! - Roster (names, roles, votes)
//! - Secret word and clue transcript
//! - Winner of a finished game
//!
//! Uses `im` persistent structures under the clue log so cloning a full
//! snapshot is O(1). The `epoch` field counts game generations; scheduled
//! AI work captures it and goes stale when it no longer matches.

use serde::{Deserialize, Serialize};

use super::clue::{Clue, ClueLog};
use super::config::GameConfig;
use super::player::PlayerId;
use super::roster::{Role, Roster};

/// Lifecycle phase of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Waiting to start. Names editable, nothing dealt.
    #[default]
    Lobby,
    /// Roles and word just dealt; players peek at what they got.
    Reveal,
    /// Clue rounds in progress.
    Playing,
    /// All clues spoken; votes coming in.
    Voting,
    /// The vote had no unique maximum. Nobody wins.
    Tie,
    /// A seat was expelled and the winning side is decided.
    GameOver,
}

impl Phase {
    /// Whether the game has finished (tie or decided).
    ///
    /// ```
    /// use impostor::core::Phase;
    ///
    /// assert!(Phase::GameOver.is_terminal());
    /// assert!(Phase::Tie.is_terminal());
    /// assert!(!Phase::Voting.is_terminal());
    /// ```
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Tie | Phase::GameOver)
    }
}

/// Complete game state.
///
/// Mutated only by the engine; everyone else reads snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    // === Game Progression ===
    /// Game generation counter. Bumped by `start_game` and `reset_game`;
    /// never reused within the life of an engine.
    pub epoch: u64,

    /// Current lifecycle phase.
    pub phase: Phase,

    /// Seat whose turn it is to speak (meaningful in `Playing`).
    pub current_turn: PlayerId,

    /// Current clue round, 1-based.
    pub current_round: u8,

    /// Winning side of a decided game; `None` otherwise (ties included).
    pub winner: Option<Role>,

    // === Hidden and transcript data ===
    secret_word: String,
    roster: Roster,
    clues: ClueLog,
}

impl GameState {
    /// Fresh lobby state for the given table.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            epoch: 0,
            phase: Phase::Lobby,
            current_turn: PlayerId::new(0),
            current_round: 1,
            winner: None,
            secret_word: String::new(),
            roster: Roster::from_config(config),
            clues: ClueLog::new(),
        }
    }

    // === Accessors ===

    /// The secret word of the running game. Empty in the lobby.
    #[must_use]
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    /// The table roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// One seat of the roster. Panics on an out-of-range id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &super::roster::Player {
        self.roster.get(id)
    }

    /// The clue transcript.
    #[must_use]
    pub fn clues(&self) -> &ClueLog {
        &self.clues
    }

    /// Number of seats at the table.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.roster.player_count()
    }

    /// Whether the game has finished (tie or decided).
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    // === Transitions (engine only) ===

    /// Deal a new game: word set, roles assigned, transcript cleared,
    /// first turn chosen. Enters `Reveal` and bumps the epoch.
    pub(crate) fn start_new_game(
        &mut self,
        word: String,
        impostor: PlayerId,
        first_turn: PlayerId,
    ) {
        self.epoch += 1;
        self.phase = Phase::Reveal;
        self.secret_word = word;
        self.current_turn = first_turn;
        self.current_round = 1;
        self.winner = None;
        self.roster.assign_roles(impostor);
        self.clues.clear();
    }

    /// Back to the lobby: roles, votes, word, clues, winner all cleared.
    /// Names persist. Bumps the epoch.
    pub(crate) fn reset_to_lobby(&mut self) {
        self.epoch += 1;
        self.phase = Phase::Lobby;
        self.secret_word.clear();
        self.current_turn = PlayerId::new(0);
        self.current_round = 1;
        self.winner = None;
        self.roster.clear_roles();
        self.clues.clear();
    }

    /// Append a clue spoken by the current seat in the current round.
    pub(crate) fn record_clue(&mut self, text: String) {
        self.clues.record(Clue {
            player: self.current_turn,
            text,
            round: self.current_round,
        });
    }

    /// Hand the turn to the next seat in cyclic order.
    pub(crate) fn advance_turn(&mut self) {
        self.current_turn = self.current_turn.successor(self.player_count());
    }

    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
}
