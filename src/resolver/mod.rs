//! Lesson content resolution.
//!
//! Walks an ordered list of [`LessonSource`]s (webhook, then feed by
//! default) and formats the first record it gets. When every source comes
//! back empty the built-in lesson is used, so resolution never fails.

pub mod format;

use crate::domain::{ResolvedLesson, SourceKind};
use crate::sources::LessonSource;

pub use format::{compose_lesson, strip_markup, truncate_summary, STATIC_LESSON};

pub struct ContentResolver {
    sources: Vec<Box<dyn LessonSource>>,
}

impl ContentResolver {
    pub fn new(sources: Vec<Box<dyn LessonSource>>) -> Self {
        Self { sources }
    }

    /// A resolver with no sources; always yields the static lesson.
    pub fn offline() -> Self {
        Self::new(Vec::new())
    }

    pub fn source_kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    pub async fn resolve(&self) -> ResolvedLesson {
        for source in &self.sources {
            let kind = source.kind();
            match source.fetch().await.and_then(|r| r.into_valid()) {
                Some(record) => {
                    tracing::info!(source = %kind, title = %record.title, "lesson content resolved");
                    return ResolvedLesson {
                        source: kind,
                        text: compose_lesson(&record),
                    };
                }
                None => tracing::debug!(source = %kind, "source had no content, falling through"),
            }
        }

        tracing::warn!("no live content available, using static lesson");
        ResolvedLesson {
            source: SourceKind::Static,
            text: STATIC_LESSON.to_string(),
        }
    }
}
