//! Used-word memory across games.
//!
//! Words are keyed by their lower-cased form, so "Guitar" and "guitar"
//! count as the same word. The store is strictly best-effort: the engine
//! logs and swallows failures, and a lost history only means a word may
//! repeat in a future game.

use async_trait::async_trait;

pub mod json_file;
pub mod memory;

pub use json_file::{HistoryEntry, JsonFileHistory};
pub use memory::MemoryHistory;

/// Failures at the storage boundary.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed history file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Remembers which secret words have been played.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// All words used so far, lower-cased, in no particular order.
    async fn used_words(&self) -> Result<Vec<String>, HistoryError>;

    /// Record a word as used. Recording the same word twice is a no-op.
    async fn record_word(&self, word: &str) -> Result<(), HistoryError>;
}
