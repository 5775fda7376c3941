pub mod lesson;
pub mod news;
pub mod word;

pub use lesson::{ResolvedLesson, SourceKind};
pub use news::NewsRecord;
pub use word::{VocabularyStats, WordRecord};
