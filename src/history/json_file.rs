//! File-backed history: a JSON array of `{ word, saved_at }` records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{HistoryError, HistoryStore};

/// One remembered word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The word, lower-cased.
    pub word: String,

    /// When it was first played.
    pub saved_at: DateTime<Utc>,
}

/// Whole-file JSON store keyed by lower-cased word.
#[derive(Debug)]
pub struct JsonFileHistory {
    path: PathBuf,
    // Writes are read-modify-write; this serializes them in-process.
    write_lock: Mutex<()>,
}

impl JsonFileHistory {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Where the history lives on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(body) => Ok(serde_json::from_str(&body)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistory {
    async fn used_words(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self.load().await?.into_iter().map(|e| e.word).collect())
    }

    async fn record_word(&self, word: &str) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await?;
        let word = word.to_lowercase();
        if entries.iter().any(|e| e.word == word) {
            return Ok(());
        }

        entries.push(HistoryEntry {
            word,
            saved_at: Utc::now(),
        });
        let body = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}
