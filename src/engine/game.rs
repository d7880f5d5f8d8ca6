//! The game engine: every command that moves a game forward.
//!
//! ## Command model
//!
//! The engine owns the authoritative [`GameState`] and mutates it through
//! six commands: `start_game`, `start_round`, `submit_clue`, `cast_vote`,
//! `reset_game`, `update_player_names`. Every command returns a reference
//! to the new state. A call whose preconditions do not hold (wrong phase,
//! self-vote, second vote, unknown seat, blank clue) is a silent no-op:
//! stray calls cannot corrupt the state machine, they are ignored.
//!
//! `start_game` is the one async command. It consults the history store
//! and the word source first, then applies the whole transition in one
//! step, so no partially-started game is ever observable.

use std::sync::Arc;

use crate::ai::{WordSource, FALLBACK_WORD};
use crate::core::{GameConfig, GameRng, GameState, Phase, PlayerId, Role};
use crate::engine::tally::{Tally, TallyOutcome};
use crate::history::HistoryStore;

/// Owns the authoritative state of one table.
pub struct GameEngine {
    state: GameState,
    config: GameConfig,
    rng: GameRng,
    words: Arc<dyn WordSource>,
    history: Arc<dyn HistoryStore>,
}

impl GameEngine {
    /// Engine with entropy-seeded randomness.
    pub fn new(
        config: GameConfig,
        words: Arc<dyn WordSource>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        let seed = GameRng::from_entropy().seed();
        Self::with_seed(config, seed, words, history)
    }

    /// Engine with a fixed seed, for reproducible games.
    pub fn with_seed(
        config: GameConfig,
        seed: u64,
        words: Arc<dyn WordSource>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            state: GameState::new(&config),
            config,
            rng: GameRng::new(seed),
            words,
            history,
        }
    }

    /// Read the authoritative state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// O(1) snapshot of the authoritative state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// The table configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Deal a new game. Legal from any phase; a running game is simply
    /// replaced and its scheduled work invalidated by the epoch bump.
    ///
    /// Collaborator failures never surface: an unavailable history means
    /// no exclusions, a failed word source means [`FALLBACK_WORD`].
    pub async fn start_game(&mut self) -> &GameState {
        let exclude = match self.history.used_words().await {
            Ok(words) => words,
            Err(err) => {
                tracing::warn!(error = %err, "word history unavailable, starting without exclusions");
                Vec::new()
            }
        };

        let word = match self.words.secret_word(&exclude).await {
            Ok(word) if !word.trim().is_empty() => word,
            Ok(_) => {
                tracing::warn!("word source returned a blank word, using fallback");
                FALLBACK_WORD.to_string()
            }
            Err(err) => {
                tracing::warn!(error = %err, "word source failed, using fallback");
                FALLBACK_WORD.to_string()
            }
        };

        if let Err(err) = self.history.record_word(&word).await {
            tracing::warn!(error = %err, "could not record word in history");
        }

        let n = self.config.player_count();
        let impostor = PlayerId::new(self.rng.gen_range_usize(0..n) as u8);
        let first_turn = PlayerId::new(self.rng.gen_range_usize(0..n) as u8);

        self.state.start_new_game(word, impostor, first_turn);
        tracing::info!(
            epoch = self.state.epoch,
            first_turn = %first_turn,
            "new game dealt"
        );
        tracing::debug!(
            epoch = self.state.epoch,
            impostor = %impostor,
            word = %self.state.secret_word(),
            "secret assignments"
        );
        &self.state
    }

    /// Move from the reveal screen into the first clue round. No-op
    /// outside `Reveal`.
    pub fn start_round(&mut self) -> &GameState {
        if self.state.phase != Phase::Reveal {
            return &self.state;
        }

        self.state.phase = Phase::Playing;
        tracing::info!(
            epoch = self.state.epoch,
            turn = %self.state.current_turn,
            "clue rounds begin"
        );
        &self.state
    }

    /// Record a clue for the seat whose turn it is, then hand the turn
    /// on. Once every seat has spoken, the round advances; after the
    /// last configured round, voting opens instead.
    ///
    /// No-op outside `Playing` and for blank text. The engine trusts
    /// `current_turn`: whoever drives it is responsible for submitting
    /// only on the right turn.
    pub fn submit_clue(&mut self, text: impl Into<String>) -> &GameState {
        if self.state.phase != Phase::Playing {
            return &self.state;
        }
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return &self.state;
        }

        self.state.record_clue(trimmed.to_string());
        self.state.advance_turn();

        let n = self.state.player_count();
        if self.state.clues().len() % n == 0 {
            if self.state.current_round < self.config.clue_rounds {
                self.state.current_round += 1;
                tracing::info!(
                    epoch = self.state.epoch,
                    round = self.state.current_round,
                    "next clue round"
                );
            } else {
                self.state.phase = Phase::Voting;
                tracing::info!(epoch = self.state.epoch, "voting opens");
            }
        }
        &self.state
    }

    /// Record `voter`'s vote against `target`.
    ///
    /// No-ops: outside `Voting`, self-votes, a second vote from the same
    /// seat, ids not on the roster. The vote that completes the count
    /// resolves the game on the spot.
    pub fn cast_vote(&mut self, voter: PlayerId, target: PlayerId) -> &GameState {
        if self.state.phase != Phase::Voting {
            return &self.state;
        }
        let roster = self.state.roster();
        if !roster.contains(voter) || !roster.contains(target) || voter == target {
            return &self.state;
        }
        if roster.get(voter).vote_cast.is_some() {
            return &self.state;
        }

        self.state.roster_mut().get_mut(voter).vote_cast = Some(target);
        tracing::debug!(epoch = self.state.epoch, voter = %voter, "vote recorded");

        if self.state.roster().all_votes_in() {
            self.resolve_votes();
        }
        &self.state
    }

    fn resolve_votes(&mut self) {
        let tally = Tally::of(self.state.roster());
        match tally.outcome() {
            TallyOutcome::Expelled(expelled) => {
                let was_impostor = self.state.player(expelled).is_impostor();
                self.state.winner = Some(if was_impostor {
                    Role::Innocent
                } else {
                    Role::Impostor
                });
                self.state.phase = Phase::GameOver;
                tracing::info!(
                    epoch = self.state.epoch,
                    expelled = %expelled,
                    winner = ?self.state.winner,
                    "vote resolved"
                );
            }
            TallyOutcome::Tied => {
                self.state.winner = None;
                self.state.phase = Phase::Tie;
                tracing::info!(epoch = self.state.epoch, "vote tied, nobody expelled");
            }
        }
    }

    /// Abandon the current game and return to the lobby. Names persist;
    /// everything else clears and the epoch moves on.
    pub fn reset_game(&mut self) -> &GameState {
        self.state.reset_to_lobby();
        tracing::info!(epoch = self.state.epoch, "table reset to lobby");
        &self.state
    }

    /// Rename seats in table order. Purely cosmetic: legal in any phase,
    /// surplus names ignored, idempotent.
    pub fn update_player_names<I, S>(&mut self, names: I) -> &GameState
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.roster_mut().rename(names);
        &self.state
    }
}
