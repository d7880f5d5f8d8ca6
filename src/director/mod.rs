//! The director: runs AI seats on a timer while a human drives their own.
//!
//! ## Scheduling model
//!
//! The director wraps a [`GameEngine`] behind an async mutex and, after
//! every command, inspects the new state and spawns whatever AI work it
//! calls for: the reveal countdown, the current seat's clue, one vote
//! task per AI seat. Generation runs outside the engine lock.
//!
//! Every spawned task captures the state's `epoch` and re-checks it (plus
//! phase and turn) before touching the engine. A restart or reset bumps
//! the epoch, so work scheduled for a dead game drops itself instead of
//! leaking into the new one. Duplicate tasks are harmless for the same
//! reason: whoever loses the race finds the clue spoken or the vote cast
//! and backs off.
//!
//! Provider failures never stall a game. A failed clue becomes
//! [`FALLBACK_CLUE`]; a failed or invalid vote becomes a uniformly random
//! valid target.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::sync::Mutex;

use crate::ai::{ClueGenerator, Providers, VoteOracle, FALLBACK_CLUE};
use crate::core::{GameState, Phase, PlayerId, Roster};
use crate::engine::GameEngine;

/// Pacing for scheduled AI work.
#[derive(Clone, Copy, Debug)]
pub struct DirectorConfig {
    /// Thinking time before an AI seat speaks its clue.
    pub clue_delay: Duration,
    /// Thinking time before an AI seat votes.
    pub vote_delay: Duration,
    /// How long the reveal screen stays up before the first round starts
    /// on its own. `None` leaves the advance to a manual `start_round`.
    pub reveal_delay: Option<Duration>,
}

impl DirectorConfig {
    /// Zero delays everywhere. Tests and headless simulations.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            clue_delay: Duration::ZERO,
            vote_delay: Duration::ZERO,
            reveal_delay: Some(Duration::ZERO),
        }
    }
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            clue_delay: Duration::from_secs(2),
            vote_delay: Duration::from_millis(1500),
            reveal_delay: Some(Duration::from_secs(3)),
        }
    }
}

/// Drives AI seats against a shared engine. Cheap to clone; clones share
/// the same table.
#[derive(Clone)]
pub struct Director {
    engine: Arc<Mutex<GameEngine>>,
    clues: Arc<dyn ClueGenerator>,
    votes: Arc<dyn VoteOracle>,
    config: DirectorConfig,
}

impl Director {
    /// Director with default pacing.
    pub fn new(
        engine: GameEngine,
        clues: Arc<dyn ClueGenerator>,
        votes: Arc<dyn VoteOracle>,
    ) -> Self {
        Self::with_config(engine, clues, votes, DirectorConfig::default())
    }

    /// Director with explicit pacing.
    pub fn with_config(
        engine: GameEngine,
        clues: Arc<dyn ClueGenerator>,
        votes: Arc<dyn VoteOracle>,
        config: DirectorConfig,
    ) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            clues,
            votes,
            config,
        }
    }

    /// Director fed from a provider bundle.
    pub fn with_providers(engine: GameEngine, providers: &Providers) -> Self {
        Self::new(engine, providers.clues.clone(), providers.votes.clone())
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> GameState {
        self.engine.lock().await.snapshot()
    }

    // === Commands (human driver) ===

    /// Deal a new game and schedule the reveal countdown.
    pub async fn start_game(&self) -> GameState {
        let mut engine = self.engine.lock().await;
        engine.start_game().await;
        let after = engine.snapshot();
        drop(engine);

        self.pump(&after);
        after
    }

    /// Leave the reveal screen and open the first clue round. Only needed
    /// when [`DirectorConfig::reveal_delay`] is `None`.
    pub async fn start_round(&self) -> GameState {
        let mut engine = self.engine.lock().await;
        engine.start_round();
        let after = engine.snapshot();
        drop(engine);

        self.pump(&after);
        after
    }

    /// The human speaks a clue. Ignored when it is not the human's turn;
    /// AI turns belong to the director's own tasks.
    pub async fn submit_clue(&self, text: impl Into<String>) -> GameState {
        let text = text.into();
        let mut engine = self.engine.lock().await;
        if engine.state().current_turn == engine.state().roster().human_seat() {
            engine.submit_clue(text);
        }
        let after = engine.snapshot();
        drop(engine);

        self.pump(&after);
        after
    }

    /// The human votes to expel `target`.
    pub async fn cast_vote(&self, target: PlayerId) -> GameState {
        let mut engine = self.engine.lock().await;
        let voter = engine.state().roster().human_seat();
        engine.cast_vote(voter, target);
        let after = engine.snapshot();
        drop(engine);

        self.pump(&after);
        after
    }

    /// Abandon the game and return to the lobby. In-flight AI work goes
    /// stale with the epoch bump.
    pub async fn reset_game(&self) -> GameState {
        self.engine.lock().await.reset_game().clone()
    }

    /// Rename seats in table order.
    pub async fn update_player_names<I, S>(&self, names: I) -> GameState
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.engine.lock().await.update_player_names(names).clone()
    }

    // === Scheduling ===

    /// Look at a fresh snapshot and spawn whatever AI work it calls for.
    fn pump(&self, state: &GameState) {
        match state.phase {
            Phase::Reveal => {
                if let Some(delay) = self.config.reveal_delay {
                    self.spawn_reveal(state.epoch, delay);
                }
            }
            Phase::Playing => {
                let seat = state.current_turn;
                if !state.player(seat).human {
                    self.spawn_clue(state.clone(), seat);
                }
            }
            Phase::Voting => {
                for player in state.roster().ai_players() {
                    if player.vote_cast.is_none() {
                        self.spawn_vote(state.clone(), player.id);
                    }
                }
            }
            Phase::Lobby | Phase::Tie | Phase::GameOver => {}
        }
    }

    fn spawn_reveal(&self, epoch: u64, delay: Duration) {
        let director = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut engine = director.engine.lock().await;
            let state = engine.state();
            if state.epoch != epoch || state.phase != Phase::Reveal {
                return;
            }
            engine.start_round();
            let after = engine.snapshot();
            drop(engine);

            director.pump(&after);
        });
    }

    fn spawn_clue(&self, state: GameState, seat: PlayerId) {
        let director = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(director.config.clue_delay).await;
            if director.is_stale(state.epoch).await {
                return;
            }

            let player = state.player(seat).clone();
            let secret =
                (!player.is_impostor()).then(|| state.secret_word().to_string());
            let text = match director
                .clues
                .clue(&player, secret.as_deref(), state.clues())
                .await
            {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        seat = %seat,
                        "clue generation failed, using filler"
                    );
                    FALLBACK_CLUE.to_string()
                }
            };

            let mut engine = director.engine.lock().await;
            let current = engine.state();
            if current.epoch != state.epoch
                || current.phase != Phase::Playing
                || current.current_turn != seat
            {
                tracing::debug!(seat = %seat, "scheduled clue went stale, dropping");
                return;
            }
            engine.submit_clue(text);
            let after = engine.snapshot();
            drop(engine);

            director.pump(&after);
        });
    }

    fn spawn_vote(&self, state: GameState, voter: PlayerId) {
        let director = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(director.config.vote_delay).await;
            if director.is_stale(state.epoch).await {
                return;
            }

            let player = state.player(voter).clone();
            let target = match director
                .votes
                .vote(&player, state.roster(), state.clues())
                .await
            {
                Ok(target) if state.roster().contains(target) && target != voter => {
                    target
                }
                Ok(target) => {
                    tracing::warn!(
                        voter = %voter,
                        target = %target,
                        "vote oracle picked an invalid target, voting at random"
                    );
                    match random_target(state.roster(), voter) {
                        Some(target) => target,
                        None => return,
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        voter = %voter,
                        "vote oracle failed, voting at random"
                    );
                    match random_target(state.roster(), voter) {
                        Some(target) => target,
                        None => return,
                    }
                }
            };

            let mut engine = director.engine.lock().await;
            let current = engine.state();
            if current.epoch != state.epoch
                || current.phase != Phase::Voting
                || current.player(voter).vote_cast.is_some()
            {
                tracing::debug!(voter = %voter, "scheduled vote went stale, dropping");
                return;
            }
            engine.cast_vote(voter, target);
        });
    }

    async fn is_stale(&self, epoch: u64) -> bool {
        self.engine.lock().await.state().epoch != epoch
    }
}

fn random_target(roster: &Roster, voter: PlayerId) -> Option<PlayerId> {
    let targets: Vec<PlayerId> = roster.ids().filter(|&id| id != voter).collect();
    targets.choose(&mut rand::thread_rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ScriptedClues, ScriptedVotes, UniformVotes, WordListSource};
    use crate::core::GameConfig;
    use crate::history::MemoryHistory;

    fn engine() -> GameEngine {
        GameEngine::with_seed(
            GameConfig::classic(),
            42,
            Arc::new(WordListSource::with_words(vec!["guitar".into()], 42)),
            Arc::new(MemoryHistory::new()),
        )
    }

    async fn wait_for<F>(director: &Director, what: &str, pred: F) -> GameState
    where
        F: Fn(&GameState) -> bool,
    {
        for _ in 0..400 {
            let state = director.state().await;
            if pred(&state) {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("timed out waiting for {what}: {:?}", director.state().await);
    }

    #[tokio::test]
    async fn test_with_providers_starts_in_the_lobby() {
        let director =
            Director::with_providers(engine(), &crate::ai::Providers::scripted(42));

        let state = director.state().await;
        assert_eq!(state.phase, Phase::Lobby);
        assert_eq!(state.epoch, 0);
    }

    #[tokio::test]
    async fn test_reveal_advances_on_its_own() {
        let director = Director::with_config(
            engine(),
            Arc::new(ScriptedClues::default()),
            Arc::new(UniformVotes),
            DirectorConfig::immediate(),
        );

        let state = director.start_game().await;
        assert_eq!(state.phase, Phase::Reveal);

        wait_for(&director, "first round", |s| s.phase == Phase::Playing).await;
    }

    #[tokio::test]
    async fn test_reveal_waits_for_manual_start() {
        let config = DirectorConfig {
            reveal_delay: None,
            ..DirectorConfig::immediate()
        };
        let director = Director::with_config(
            engine(),
            Arc::new(ScriptedClues::default()),
            Arc::new(UniformVotes),
            config,
        );

        director.start_game().await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(director.state().await.phase, Phase::Reveal);

        let state = director.start_round().await;
        assert_eq!(state.phase, Phase::Playing);
    }

    #[tokio::test]
    async fn test_ai_seats_speak_until_human_turn() {
        let director = Director::with_config(
            engine(),
            Arc::new(ScriptedClues::new(["strings", "frets", "loud", "wood"])),
            Arc::new(UniformVotes),
            DirectorConfig::immediate(),
        );

        director.start_game().await;
        let state = wait_for(&director, "human turn", |s| {
            s.phase == Phase::Playing && s.current_turn == s.roster().human_seat()
        })
        .await;

        // Every clue so far came from an AI seat.
        let human = state.roster().human_seat();
        assert!(state.clues().iter().all(|c| c.player != human));
    }

    #[tokio::test]
    async fn test_clue_on_ai_turn_is_ignored() {
        let director = Director::with_config(
            engine(),
            Arc::new(ScriptedClues::default()),
            Arc::new(UniformVotes),
            DirectorConfig {
                // Park the game on the first AI turn.
                clue_delay: Duration::from_secs(60),
                ..DirectorConfig::immediate()
            },
        );

        director.start_game().await;
        let state = wait_for(&director, "playing", |s| s.phase == Phase::Playing).await;
        if state.current_turn == state.roster().human_seat() {
            // Seed happened to open on the human; nothing to check here.
            return;
        }

        let before_len = state.clues().len();
        let after = director.submit_clue("butting in").await;
        assert_eq!(after.clues().len(), before_len);
    }

    #[tokio::test]
    async fn test_reset_goes_stale_before_scheduled_work_lands() {
        let director = Director::with_config(
            engine(),
            Arc::new(ScriptedClues::new(["strings"])),
            Arc::new(UniformVotes),
            DirectorConfig {
                clue_delay: Duration::from_millis(30),
                ..DirectorConfig::immediate()
            },
        );

        director.start_game().await;
        wait_for(&director, "playing", |s| s.phase == Phase::Playing).await;

        // Reset while the first clue task is still sleeping.
        let state = director.reset_game().await;
        let epoch = state.epoch;

        tokio::time::sleep(Duration::from_millis(80)).await;
        let state = director.state().await;
        assert_eq!(state.phase, Phase::Lobby);
        assert_eq!(state.epoch, epoch);
        assert!(state.clues().is_empty());
    }

    #[tokio::test]
    async fn test_vote_oracle_failure_falls_back_to_random() {
        // No planned votes at all: every AI vote errors and falls back.
        let director = Director::with_config(
            engine(),
            Arc::new(ScriptedClues::default()),
            Arc::new(ScriptedVotes::new([])),
            DirectorConfig::immediate(),
        );

        director.start_game().await;
        let state = wait_for(&director, "voting", |s| {
            s.phase == Phase::Voting
                || (s.phase == Phase::Playing
                    && s.current_turn == s.roster().human_seat())
        })
        .await;

        // Drive the human's clues whenever the turn comes around.
        let mut state = state;
        while state.phase == Phase::Playing {
            if state.current_turn == state.roster().human_seat() {
                director.submit_clue("mine").await;
            }
            state = wait_for(&director, "voting or human turn", |s| {
                s.phase != Phase::Playing
                    || s.current_turn == s.roster().human_seat()
            })
            .await;
        }

        assert_eq!(state.phase, Phase::Voting);
        let state = wait_for(&director, "ai votes", |s| {
            s.roster().ai_players().all(|p| p.vote_cast.is_some())
        })
        .await;

        for player in state.roster().ai_players() {
            let target = player.vote_cast.unwrap();
            assert_ne!(target, player.id);
            assert!(state.roster().contains(target));
        }
    }
}
