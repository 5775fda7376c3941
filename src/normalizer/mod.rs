use feed_rs::model::Entry;
use feed_rs::parser;

use crate::app::{LectorError, Result};
use crate::domain::news::{clean_title, NO_SUMMARY, NO_TITLE, UNKNOWN_DATE};
use crate::domain::NewsRecord;

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parses a feed and maps its first entry to a [`NewsRecord`].
    ///
    /// Feeds list their newest entry first, so the first entry is taken as
    /// the latest. Missing fields get placeholder text; an empty feed is an
    /// error rather than a blank record.
    pub fn latest(&self, feed_url: &str, body: &[u8]) -> Result<NewsRecord> {
        let feed = parser::parse(body).map_err(|e| LectorError::FeedParse(e.to_string()))?;

        let entry = feed
            .entries
            .into_iter()
            .next()
            .ok_or_else(|| LectorError::EmptyFeed(feed_url.to_string()))?;

        Ok(to_record(entry))
    }
}

fn to_record(entry: Entry) -> NewsRecord {
    let title = entry
        .title
        .map(|t| clean_title(&t.content))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    // Summary is kept raw; markup is stripped when the lesson is composed.
    let summary = entry
        .summary
        .map(|s| s.content)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| entry.content.and_then(|c| c.body))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| NO_SUMMARY.to_string());

    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_default();

    let published = entry
        .published
        .or(entry.updated)
        .map(|dt| dt.to_rfc2822())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());

    NewsRecord {
        title,
        summary,
        link,
        published,
    }
}
