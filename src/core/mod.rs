//! Core game types: players, roster, clues, state, RNG, configuration.
//!
//! This module contains the fundamental building blocks of a game. The
//! table shape is configured via `GameConfig` rather than hardcoded; the
//! state machine that drives these types lives in `engine`.

pub mod clue;
pub mod config;
pub mod player;
pub mod rng;
pub mod roster;
pub mod state;

pub use clue::{Clue, ClueLog};
pub use config::{GameConfig, SeatConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use roster::{Player, Role, Roster};
pub use state::{GameState, Phase};
