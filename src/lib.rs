//! # impostor
//!
//! A social deduction party game engine: one human, a table of AI
//! personas, and a secret word the impostor never sees.
//!
//! ## Design Principles
//!
//! 1. **Owned State, Command API**: The engine owns the authoritative
//!    `GameState` and mutates it through commands. Everyone else reads
//!    O(1) snapshots.
//!
//! 2. **N-Player First**: Turn rotation, round bookkeeping, and vote
//!    tallies work for any table size; the classic 3-seat game is just
//!    the default configuration.
//!
//! 3. **Calls That Cannot Break the Game**: Commands whose preconditions
//!    do not hold (wrong phase, self-vote, stale scheduled work) are
//!    silent no-ops, so UIs and timers can fire freely.
//!
//! ## Architecture
//!
//! - **Epoch Guards**: Every game generation gets a fresh epoch; AI work
//!   scheduled by the director carries the epoch it was planned under and
//!   drops itself once it no longer matches.
//!
//! - **Providers Behind Traits**: Word selection, clue phrasing, and vote
//!   decisions are `async` trait objects. Gemini backs them in production;
//!   scripted implementations back them offline and in tests.
//!
//! - **Fallbacks Over Failures**: A dead provider degrades the game
//!   (fallback word, filler clue, random vote) instead of stalling it.
//!
//! ## Modules
//!
//! - `core`: Players, roster, clues, state, RNG, configuration
//! - `engine`: Game commands, turn flow, vote tally
//! - `ai`: Provider traits, the Gemini adapter, scripted providers
//! - `history`: Used-word store (in-memory and JSON file)
//! - `director`: Async scheduler that plays the AI seats

pub mod core;
pub mod engine;
pub mod ai;
pub mod history;
pub mod director;

// Re-export commonly used types
pub use crate::core::{
    Clue, ClueLog,
    GameConfig, SeatConfig,
    GameRng,
    GameState, Phase,
    Player, PlayerId, PlayerMap,
    Role, Roster,
};

pub use crate::engine::{GameEngine, Tally, TallyOutcome};

pub use crate::ai::{
    AiError, ClueGenerator, GeminiClient, Providers, VoteOracle, WordSource,
    FALLBACK_CLUE, FALLBACK_WORD,
};

pub use crate::history::{HistoryError, HistoryStore, JsonFileHistory, MemoryHistory};

pub use crate::director::{Director, DirectorConfig};
