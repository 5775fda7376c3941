//! Vocabulary drills backed by an optional word store.
//!
//! [`VocabularyStore`] never fails. Without a connection string, or when the
//! backend cannot be opened, it runs in degraded mode and every operation
//! returns an empty result. Backend errors on individual calls are logged and
//! reported the same way.

use std::path::{Path, PathBuf};

use crate::app::Result;
use crate::config::VocabularyConfig;
use crate::domain::{VocabularyStats, WordRecord};
use crate::store::{SqliteWordStore, WordStore};

pub const DEFAULT_SAMPLE_SIZE: usize = 5;
pub const DEFAULT_UNTRAINED_BATCH: usize = 10;

const IN_MEMORY: &str = ":memory:";

pub struct VocabularyStore {
    backend: Option<SqliteWordStore>,
}

impl VocabularyStore {
    /// Opens the configured collection, degrading instead of failing.
    pub fn connect(config: &VocabularyConfig) -> Self {
        let Some(url) = config.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            tracing::warn!("vocabulary connection string not set, vocabulary features disabled");
            return Self::degraded();
        };

        match open_backend(url, &config.database, &config.collection) {
            Ok(store) => {
                tracing::info!(
                    database = %config.database,
                    collection = %config.collection,
                    "connected to vocabulary store"
                );
                Self::with_backend(store)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to open vocabulary store, running degraded");
                Self::degraded()
            }
        }
    }

    pub fn with_backend(backend: SqliteWordStore) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn degraded() -> Self {
        Self { backend: None }
    }

    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend(&self) -> Option<&SqliteWordStore> {
        self.backend.as_ref()
    }

    pub fn sample_random(&self, count: usize, trained_only: bool) -> Vec<WordRecord> {
        let words = self.run("sample random words", Vec::new(), |s| {
            s.sample_random(count, trained_only)
        });
        tracing::info!(count = words.len(), trained_only, "sampled vocabulary words");
        words
    }

    pub fn untrained_words(&self, count: usize) -> Vec<WordRecord> {
        let words = self.run("fetch untrained words", Vec::new(), |s| s.untrained_words(count));
        tracing::info!(count = words.len(), "fetched untrained words");
        words
    }

    pub fn mark_trained(&self, word: &str) -> bool {
        let marked = self.run("mark word as trained", false, |s| s.mark_trained(word));
        if marked {
            tracing::info!(word, "marked word as trained");
        } else if self.is_connected() {
            tracing::warn!(word, "word not found or already trained");
        }
        marked
    }

    pub fn find_word(&self, word: &str) -> Option<WordRecord> {
        let found = self.run("look up word", None, |s| s.find_word(word));
        match &found {
            Some(record) => tracing::info!(word, translate = %record.translate, "found word"),
            None => tracing::debug!(word, "word not in vocabulary"),
        }
        found
    }

    pub fn stats(&self) -> VocabularyStats {
        let stats = self.run("count words", VocabularyStats::default(), |s| s.stats());
        tracing::info!(total = stats.total, trained = stats.trained, "vocabulary stats");
        stats
    }

    /// Releases the backend connection. Dropping the store does the same,
    /// minus the error report.
    pub fn close(self) {
        if let Some(backend) = self.backend {
            match backend.close() {
                Ok(()) => tracing::info!("vocabulary store closed"),
                Err(e) => tracing::warn!(error = %e, "error while closing vocabulary store"),
            }
        }
    }

    fn run<T>(&self, what: &str, empty: T, op: impl FnOnce(&SqliteWordStore) -> Result<T>) -> T {
        let Some(store) = &self.backend else {
            return empty;
        };

        match op(store) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(error = %e, "failed to {}", what);
                empty
            }
        }
    }
}

/// Drill prompt for one word, as spoken by the tutor.
pub fn format_for_lesson(word: &WordRecord) -> String {
    let mut text = format!("Let's practice the word '{}'.", word.word);

    if !word.transcript.is_empty() {
        text.push_str(&format!(" The pronunciation is [{}].", word.transcript));
    }

    if !word.translate.is_empty() {
        text.push_str(&format!(" In Russian, it means '{}'.", word.translate));
    }

    text.push_str(&format!(" Can you use '{}' in a sentence?", word.word));
    text
}

fn open_backend(url: &str, database: &str, collection: &str) -> Result<SqliteWordStore> {
    if url == IN_MEMORY {
        return SqliteWordStore::in_memory(collection);
    }
    SqliteWordStore::open(database_path(Path::new(url), database), collection)
}

/// A directory connection string holds one file per database name.
fn database_path(url: &Path, database: &str) -> PathBuf {
    if url.is_dir() {
        url.join(format!("{}.db", database))
    } else {
        url.to_path_buf()
    }
}
