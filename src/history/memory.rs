//! In-process history, the default store.

use async_trait::async_trait;
use rustc_hash::FxHashSet;
use tokio::sync::Mutex;

use super::{HistoryError, HistoryStore};

/// Keeps used words in a set for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    words: Mutex<FxHashSet<String>>,
}

impl MemoryHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn used_words(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self.words.lock().await.iter().cloned().collect())
    }

    async fn record_word(&self, word: &str) -> Result<(), HistoryError> {
        self.words.lock().await.insert(word.to_lowercase());
        Ok(())
    }
}
