//! The game engine: commands, turn flow, and vote resolution.
//!
//! [`GameEngine`] owns the authoritative [`crate::core::GameState`] and
//! exposes the commands a UI or driver calls. [`Tally`] is the vote
//! count; its [`TallyOutcome`] decides expulsion or tie.

pub mod game;
pub mod tally;

pub use game::GameEngine;
pub use tally::{Tally, TallyOutcome};
