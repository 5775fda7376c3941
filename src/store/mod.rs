pub mod sqlite;

use crate::app::Result;
use crate::domain::{VocabularyStats, WordRecord};

pub use sqlite::SqliteWordStore;

/// Backing storage for one vocabulary collection.
pub trait WordStore {
    fn sample_random(&self, count: usize, trained_only: bool) -> Result<Vec<WordRecord>>;
    fn untrained_words(&self, count: usize) -> Result<Vec<WordRecord>>;

    /// Flips `trained` false → true. Returns `false` when the word is
    /// missing or already trained.
    fn mark_trained(&self, word: &str) -> Result<bool>;
    fn find_word(&self, word: &str) -> Result<Option<WordRecord>>;
    fn stats(&self) -> Result<VocabularyStats>;
}
