use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A vocabulary entry. `trained_at` is set exactly when `trained` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    #[serde(default)]
    pub translate: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub trained: bool,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
}

impl WordRecord {
    pub fn new(word: impl Into<String>, translate: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translate: translate.into(),
            transcript: String::new(),
            trained: false,
            trained_at: None,
        }
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = transcript.into();
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VocabularyStats {
    pub total: u64,
    pub trained: u64,
    pub untrained: u64,
}

impl VocabularyStats {
    /// Derives `untrained` so the three counts always add up.
    pub fn from_counts(total: u64, trained: u64) -> Self {
        let trained = trained.min(total);
        Self {
            total,
            trained,
            untrained: total - trained,
        }
    }
}
