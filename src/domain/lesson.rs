use std::fmt;

use serde::Serialize;

/// Which tier of the fallback chain produced the lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceKind {
    Webhook,
    Feed,
    Static,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Webhook => "webhook",
            SourceKind::Feed => "feed",
            SourceKind::Static => "static",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lesson text ready to be read aloud, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLesson {
    pub source: SourceKind,
    pub text: String,
}
