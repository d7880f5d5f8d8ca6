//! AI collaborators: contracts, the Gemini adapter, offline providers.
//!
//! The engine and director depend only on the traits in [`traits`].
//! [`Providers`] bundles one implementation of each role and picks
//! between Gemini and the offline scripted set based on the environment,
//! so a missing API key degrades play instead of blocking it.

pub mod gemini;
pub mod scripted;
pub mod traits;

pub use gemini::GeminiClient;
pub use scripted::{
    FillerClues, ScriptedClues, ScriptedVotes, UniformVotes, WordListSource, WORD_LIST,
};
pub use traits::{
    AiError, ClueGenerator, VoteOracle, WordSource, FALLBACK_CLUE, FALLBACK_WORD,
};

use std::sync::Arc;

/// The collaborator bundle a game runs with.
#[derive(Clone)]
pub struct Providers {
    /// Secret word supplier (consumed by the engine).
    pub words: Arc<dyn WordSource>,

    /// Clue phrasing for AI seats (consumed by the director).
    pub clues: Arc<dyn ClueGenerator>,

    /// Vote decisions for AI seats (consumed by the director).
    pub votes: Arc<dyn VoteOracle>,
}

impl Providers {
    /// All three roles served by one Gemini client.
    #[must_use]
    pub fn gemini(client: GeminiClient) -> Self {
        let client = Arc::new(client);
        Self {
            words: client.clone(),
            clues: client.clone(),
            votes: client,
        }
    }

    /// Deterministic offline set: built-in word list, filler clues,
    /// random votes.
    #[must_use]
    pub fn scripted(seed: u64) -> Self {
        Self {
            words: Arc::new(WordListSource::new(seed)),
            clues: Arc::new(FillerClues),
            votes: Arc::new(UniformVotes),
        }
    }

    /// Gemini when `GEMINI_API_KEY` is set, offline providers otherwise.
    #[must_use]
    pub fn from_env() -> Self {
        match GeminiClient::from_env() {
            Ok(client) => Self::gemini(client),
            Err(err) => {
                tracing::warn!(error = %err, "no Gemini credentials, using offline providers");
                Self::scripted(rand::random())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_bundle_is_playable() {
        let providers = Providers::scripted(42);

        let word = providers.words.secret_word(&[]).await.unwrap();
        assert!(WORD_LIST.contains(&word.as_str()));
    }
}
