//! Gemini text-generation client.
//!
//! One HTTP adapter serves all three AI roles: picking the secret word,
//! phrasing clues for innocents and the impostor, and deciding votes.
//! Wire format is the `generateContent` REST call; only the first text
//! part of the first candidate is read, and every reply is tidied down
//! to a single line before use.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::traits::{AiError, ClueGenerator, VoteOracle, WordSource};
use crate::core::{ClueLog, Player, PlayerId, Roster};

/// Default public API endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client against the public endpoint with the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different endpoint (for tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a different model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Create a client from environment variables.
    ///
    /// Requires `GEMINI_API_KEY`; honors `GEMINI_BASE_URL` and
    /// `GEMINI_MODEL` when set. A missing key surfaces as
    /// [`AiError::MissingApiKey`] so callers can degrade to the offline
    /// providers instead of blocking play.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AiError::MissingApiKey)?;
        let mut client = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            client = client.with_base_url(base_url);
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            client = client.with_model(model);
        }
        Ok(client)
    }

    async fn generate(&self, prompt: String) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self.client.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::InvalidResponse(format!(
                "status {status}: {body}"
            )));
        }

        let body = response.text().await?;
        let payload: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| AiError::InvalidResponse(e.to_string()))?;
        payload
            .first_text()
            .ok_or_else(|| AiError::InvalidResponse("no candidates in response".into()))
    }
}

#[async_trait]
impl WordSource for GeminiClient {
    async fn secret_word(&self, exclude: &[String]) -> Result<String, AiError> {
        let reply = self.generate(word_prompt(exclude)).await?;
        let word = tidy(&reply).to_lowercase();
        let word = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_string();

        if word.is_empty() || word.split_whitespace().count() != 1 {
            return Err(AiError::InvalidResponse(format!(
                "unusable word {word:?}"
            )));
        }
        if exclude.iter().any(|e| e.eq_ignore_ascii_case(&word)) {
            return Err(AiError::InvalidResponse(format!(
                "word {word:?} was already used"
            )));
        }
        Ok(word)
    }
}

#[async_trait]
impl ClueGenerator for GeminiClient {
    async fn clue(
        &self,
        player: &Player,
        secret_word: Option<&str>,
        history: &ClueLog,
    ) -> Result<String, AiError> {
        let prompt = match secret_word {
            Some(word) => innocent_prompt(player, word, history),
            None => impostor_prompt(player, history),
        };

        let clue = tidy(&self.generate(prompt).await?);
        if clue.is_empty() {
            return Err(AiError::InvalidResponse("empty clue".into()));
        }
        if let Some(word) = secret_word {
            if clue.to_lowercase().contains(&word.to_lowercase()) {
                tracing::warn!(player = %player.id, "generated clue leaked the word");
                return Err(AiError::LeakedSecret);
            }
        }
        Ok(clue)
    }
}

#[async_trait]
impl VoteOracle for GeminiClient {
    async fn vote(
        &self,
        voter: &Player,
        roster: &Roster,
        history: &ClueLog,
    ) -> Result<PlayerId, AiError> {
        let reply = self.generate(vote_prompt(voter, roster, history)).await?;
        parse_vote(&reply, roster, voter.id)
    }
}

/// First non-empty line, with wrapping quotes stripped.
fn tidy(text: &str) -> String {
    let line = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("")
        .trim();
    line.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string()
}

/// The first run of digits in the reply, read as a seat number.
fn parse_vote(reply: &str, roster: &Roster, voter: PlayerId) -> Result<PlayerId, AiError> {
    let digits: String = reply
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let seat: u8 = digits
        .parse()
        .map_err(|_| AiError::InvalidResponse(format!("no seat number in {reply:?}")))?;

    let target = PlayerId::new(seat);
    if !roster.contains(target) || target == voter {
        return Err(AiError::InvalidResponse(format!(
            "invalid vote target {seat}"
        )));
    }
    Ok(target)
}

fn persona_line(player: &Player) -> String {
    match &player.persona {
        Some(persona) => format!("You are {}, {}.", player.name, persona),
        None => format!("You are {}.", player.name),
    }
}

fn transcript(history: &ClueLog) -> String {
    if history.is_empty() {
        return "(no clues yet)".to_string();
    }
    history
        .iter()
        .map(|c| format!("- {} said: \"{}\"", c.player, c.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn word_prompt(exclude: &[String]) -> String {
    let mut prompt = String::from(
        "Pick one common noun for a party guessing game. Everyday objects, \
         animals or places work best. Reply with the word only, lowercase, \
         no punctuation.",
    );
    if !exclude.is_empty() {
        prompt.push_str("\nDo not use any of these words: ");
        prompt.push_str(&exclude.join(", "));
        prompt.push('.');
    }
    prompt
}

fn innocent_prompt(player: &Player, word: &str, history: &ClueLog) -> String {
    format!(
        "{persona}\n\
         You are playing the party game \"Impostor\".\n\
         The secret word is: \"{word}\".\n\n\
         Clues said so far:\n{transcript}\n\n\
         Your mission: say ONE very short clue (10 words max) about the \
         secret word.\n\
         Rules:\n\
         1. Never say the secret word itself.\n\
         2. Not too obvious, but do not lie either.\n\
         3. Stay in character.\n\n\
         Answer with the clue only:",
        persona = persona_line(player),
        word = word,
        transcript = transcript(history),
    )
}

fn impostor_prompt(player: &Player, history: &ClueLog) -> String {
    format!(
        "{persona}\n\
         You are playing the party game \"Impostor\".\n\
         YOU ARE THE IMPOSTOR. You do NOT know the secret word.\n\n\
         Clues the others said (use them to guess the topic):\n{transcript}\n\n\
         Your mission: say ONE very short clue (10 words max) that blends \
         in with the others.\n\
         Rules:\n\
         1. Stay vague and generic so nobody catches you.\n\
         2. If there are no clues yet, say something that fits many things.\n\
         3. Bluff with confidence.\n\n\
         Answer with the clue only:",
        persona = persona_line(player),
        transcript = transcript(history),
    )
}

fn vote_prompt(voter: &Player, roster: &Roster, history: &ClueLog) -> String {
    let seats = roster
        .iter()
        .map(|p| {
            if p.id == voter.id {
                format!("- {}: {} (you)", p.id.index(), p.name)
            } else {
                format!("- {}: {}", p.id.index(), p.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{persona}\n\
         You are playing the party game \"Impostor\". Exactly one player \
         does not know the secret word and has been bluffing. The clue \
         rounds are over; it is time to vote.\n\n\
         The players:\n{seats}\n\n\
         Full clue transcript:\n{transcript}\n\n\
         Decide which player is most likely the impostor. You cannot vote \
         for yourself.\n\n\
         Answer with the seat number only (for example: 2):",
        persona = persona_line(voter),
        seats = seats,
        transcript = transcript(history),
    )
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|p| p.text)
    }
}
