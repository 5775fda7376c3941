use html_escape::decode_html_entities;
use serde::{Deserialize, Deserializer, Serialize};

pub const NO_TITLE: &str = "No title";
pub const NO_SUMMARY: &str = "No summary";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// A single news entry picked from a webhook or a feed.
///
/// Lives for one resolution call only. A record whose title and summary are
/// both blank is never handed out; absence is `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewsRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Title as spoken: entities decoded, outer whitespace trimmed.
///
/// Applied to every source. Summaries stay raw until the lesson is composed.
pub fn clean_title(raw: &str) -> String {
    decode_html_entities(raw).trim().to_string()
}

impl NewsRecord {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            link: String::new(),
            published: String::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !(self.title.trim().is_empty() && self.summary.trim().is_empty())
    }

    /// Returns the record only if it carries a title or a summary.
    pub fn into_valid(self) -> Option<Self> {
        self.is_valid().then_some(self)
    }
}
