//! Offline providers: deterministic words, filler clues, random votes.
//!
//! These keep a game playable with no LLM configured, and give tests
//! providers they can script exactly. `WordListSource` is seeded, so an
//! offline game setup replays from its seed like everything else.

use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

use super::traits::{AiError, ClueGenerator, VoteOracle, WordSource, FALLBACK_CLUE};
use crate::core::{ClueLog, GameRng, Player, PlayerId, Roster};

/// Built-in pool of common nouns for offline play.
pub const WORD_LIST: &[&str] = &[
    "broom", "guitar", "pizza", "sun", "mountain", "computer", "cat",
    "shoes", "beach", "book", "mirror", "bicycle", "umbrella", "candle",
    "bridge", "clock", "garden", "island", "ladder", "lantern", "market",
    "ocean", "pillow", "rocket", "saddle", "theater", "train", "violin",
    "window", "winter",
];

/// Seeded word picker over [`WORD_LIST`] or a custom pool.
pub struct WordListSource {
    words: Vec<String>,
    rng: Mutex<GameRng>,
}

impl WordListSource {
    /// Pick from the built-in list.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_words(WORD_LIST.iter().map(|w| (*w).to_string()).collect(), seed)
    }

    /// Pick from a custom pool.
    #[must_use]
    pub fn with_words(words: Vec<String>, seed: u64) -> Self {
        assert!(!words.is_empty(), "Need at least one word");
        Self {
            words,
            rng: Mutex::new(GameRng::new(seed)),
        }
    }
}

#[async_trait]
impl WordSource for WordListSource {
    async fn secret_word(&self, exclude: &[String]) -> Result<String, AiError> {
        let mut candidates: Vec<String> = self
            .words
            .iter()
            .filter(|w| !exclude.iter().any(|e| e.eq_ignore_ascii_case(w)))
            .cloned()
            .collect();
        if candidates.is_empty() {
            // Every word has been used before; recycle the pool.
            candidates = self.words.clone();
        }

        let mut rng = self.rng.lock().await;
        rng.choose(&candidates)
            .cloned()
            .ok_or_else(|| AiError::InvalidResponse("empty word pool".into()))
    }
}

/// Always answers with [`FALLBACK_CLUE`].
pub struct FillerClues;

#[async_trait]
impl ClueGenerator for FillerClues {
    async fn clue(
        &self,
        _player: &Player,
        _secret_word: Option<&str>,
        _history: &ClueLog,
    ) -> Result<String, AiError> {
        Ok(FALLBACK_CLUE.to_string())
    }
}

/// Votes for a uniformly random seat other than the voter.
pub struct UniformVotes;

#[async_trait]
impl VoteOracle for UniformVotes {
    async fn vote(
        &self,
        voter: &Player,
        roster: &Roster,
        _history: &ClueLog,
    ) -> Result<PlayerId, AiError> {
        use rand::seq::SliceRandom;

        let targets: Vec<PlayerId> = roster.ids().filter(|&id| id != voter.id).collect();
        targets
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or_else(|| AiError::InvalidResponse("no valid vote target".into()))
    }
}

/// Clue texts served in order; [`FALLBACK_CLUE`] once the script drains.
#[derive(Default)]
pub struct ScriptedClues {
    queue: Mutex<VecDeque<String>>,
}

impl ScriptedClues {
    pub fn new<I, S>(clues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: Mutex::new(clues.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl ClueGenerator for ScriptedClues {
    async fn clue(
        &self,
        _player: &Player,
        _secret_word: Option<&str>,
        _history: &ClueLog,
    ) -> Result<String, AiError> {
        Ok(self
            .queue
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| FALLBACK_CLUE.to_string()))
    }
}

/// A fixed vote plan per seat.
///
/// Deterministic even when vote tasks complete out of order. Seats
/// without a planned target get an error, which exercises the caller's
/// random-target fallback.
pub struct ScriptedVotes {
    plan: Vec<(PlayerId, PlayerId)>,
}

impl ScriptedVotes {
    pub fn new(plan: impl IntoIterator<Item = (PlayerId, PlayerId)>) -> Self {
        Self {
            plan: plan.into_iter().collect(),
        }
    }
}

#[async_trait]
impl VoteOracle for ScriptedVotes {
    async fn vote(
        &self,
        voter: &Player,
        _roster: &Roster,
        _history: &ClueLog,
    ) -> Result<PlayerId, AiError> {
        self.plan
            .iter()
            .find(|(v, _)| *v == voter.id)
            .map(|(_, target)| *target)
            .ok_or_else(|| {
                AiError::InvalidResponse(format!("no planned vote for {}", voter.id))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, SeatConfig};

    fn roster() -> Roster {
        Roster::from_config(&GameConfig::classic())
    }

    fn player(roster: &Roster, id: u8) -> Player {
        roster.get(PlayerId::new(id)).clone()
    }

    #[tokio::test]
    async fn test_word_list_honors_exclusions() {
        let source = WordListSource::with_words(
            vec!["guitar".into(), "pizza".into(), "sun".into()],
            7,
        );
        let exclude = vec!["Guitar".to_string(), "PIZZA".to_string()];

        for _ in 0..20 {
            let word = source.secret_word(&exclude).await.unwrap();
            assert_eq!(word, "sun");
        }
    }

    #[tokio::test]
    async fn test_word_list_recycles_when_exhausted() {
        let source = WordListSource::with_words(vec!["guitar".into()], 7);
        let exclude = vec!["guitar".to_string()];

        let word = source.secret_word(&exclude).await.unwrap();
        assert_eq!(word, "guitar");
    }

    #[tokio::test]
    async fn test_word_list_is_seeded() {
        let a = WordListSource::new(42);
        let b = WordListSource::new(42);

        for _ in 0..5 {
            assert_eq!(
                a.secret_word(&[]).await.unwrap(),
                b.secret_word(&[]).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_filler_clues() {
        let roster = roster();
        let clue = FillerClues
            .clue(&player(&roster, 1), Some("guitar"), &ClueLog::new())
            .await
            .unwrap();
        assert_eq!(clue, FALLBACK_CLUE);
    }

    #[tokio::test]
    async fn test_scripted_clues_then_filler() {
        let clues = ScriptedClues::new(["strings", "frets"]);
        let roster = roster();
        let p = player(&roster, 1);
        let log = ClueLog::new();

        assert_eq!(clues.clue(&p, None, &log).await.unwrap(), "strings");
        assert_eq!(clues.clue(&p, None, &log).await.unwrap(), "frets");
        assert_eq!(clues.clue(&p, None, &log).await.unwrap(), FALLBACK_CLUE);
    }

    #[tokio::test]
    async fn test_scripted_votes_by_seat() {
        let votes = ScriptedVotes::new([
            (PlayerId::new(1), PlayerId::new(0)),
            (PlayerId::new(2), PlayerId::new(0)),
        ]);
        let roster = roster();
        let log = ClueLog::new();

        let target = votes.vote(&player(&roster, 2), &roster, &log).await.unwrap();
        assert_eq!(target, PlayerId::new(0));

        let target = votes.vote(&player(&roster, 1), &roster, &log).await.unwrap();
        assert_eq!(target, PlayerId::new(0));

        assert!(votes.vote(&player(&roster, 0), &roster, &log).await.is_err());
    }

    #[tokio::test]
    async fn test_uniform_votes_never_self() {
        let roster = roster();
        let voter = player(&roster, 1);
        let log = ClueLog::new();

        for _ in 0..50 {
            let target = UniformVotes.vote(&voter, &roster, &log).await.unwrap();
            assert_ne!(target, voter.id);
            assert!(roster.contains(target));
        }
    }
}
