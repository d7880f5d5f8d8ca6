//! Clue records and the append-only clue log.
//!
//! Clues are the public transcript of a game: who spoke, what they said,
//! and in which clue round. The log is backed by a persistent vector so
//! cloning a full state snapshot is O(1), which the director relies on
//! when handing history to AI tasks without holding the engine lock.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A single spoken clue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    /// Seat that spoke.
    pub player: PlayerId,

    /// The clue text. Never blank.
    pub text: String,

    /// Clue round it was spoken in (1-based).
    pub round: u8,
}

/// Append-only log of every clue spoken this game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueLog {
    entries: Vector<Clue>,
}

impl ClueLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, clue: Clue) {
        self.entries.push_back(clue);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Total clues spoken this game.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been said yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent clue.
    #[must_use]
    pub fn last(&self) -> Option<&Clue> {
        self.entries.last()
    }

    /// Iterate clues in the order they were spoken.
    pub fn iter(&self) -> impl Iterator<Item = &Clue> {
        self.entries.iter()
    }

    /// Iterate the clues of one round, in spoken order.
    pub fn for_round(&self, round: u8) -> impl Iterator<Item = &Clue> {
        self.entries.iter().filter(move |c| c.round == round)
    }
}
