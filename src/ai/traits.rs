//! Collaborator contracts for AI-driven play.
//!
//! Three narrow ports: where the secret word comes from, how AI seats
//! phrase their clues, and who they suspect when voting. All of them are
//! allowed to fail; every caller has a fixed local fallback so a broken
//! or absent provider never blocks a game.

use async_trait::async_trait;

use crate::core::{ClueLog, Player, PlayerId, Roster};

/// Word dealt when the word source fails or returns something unusable.
pub const FALLBACK_WORD: &str = "pizza";

/// Clue spoken when a generator fails or returns something unusable.
pub const FALLBACK_CLUE: &str = "Hmm... I'm still thinking...";

/// Failures at the AI boundary.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Transport-level failure talking to the provider.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with something unusable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A generated clue contained the secret word.
    #[error("clue leaked the secret word")]
    LeakedSecret,

    /// No API key in the environment.
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}

/// Supplies the secret word for a new game.
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Pick a secret word, avoiding `exclude` (lower-cased comparison).
    ///
    /// The engine maps any failure to [`FALLBACK_WORD`], so `start_game`
    /// itself never fails.
    async fn secret_word(&self, exclude: &[String]) -> Result<String, AiError>;
}

/// Phrases a clue for an AI seat.
#[async_trait]
pub trait ClueGenerator: Send + Sync {
    /// Produce a clue for `player`.
    ///
    /// `secret_word` is `Some` for innocents and `None` for the impostor,
    /// who has to bluff from `history` alone. Implementations must never
    /// return text containing the secret word; the Gemini adapter turns a
    /// leak into [`AiError::LeakedSecret`].
    async fn clue(
        &self,
        player: &Player,
        secret_word: Option<&str>,
        history: &ClueLog,
    ) -> Result<String, AiError>;
}

/// Decides which seat an AI voter suspects.
#[async_trait]
pub trait VoteOracle: Send + Sync {
    /// Pick a target for `voter`.
    ///
    /// The result must be a seat on the roster other than `voter`; the
    /// director validates and falls back to a uniformly random valid
    /// target when an oracle misbehaves.
    async fn vote(
        &self,
        voter: &Player,
        roster: &Roster,
        history: &ClueLog,
    ) -> Result<PlayerId, AiError>;
}
