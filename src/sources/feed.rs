use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::app::{LectorError, Result};
use crate::domain::{NewsRecord, SourceKind};
use crate::fetcher::{FetchResult, Fetcher};
use crate::normalizer::Normalizer;
use crate::sources::LessonSource;

pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the latest entry of a syndication feed.
///
/// Holds an ordered list of configured feeds but only ever tries the first
/// one on its own; falling through to others is the caller's call.
pub struct FeedFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    feeds: Vec<String>,
    timeout: Duration,
}

impl FeedFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, feeds: Vec<String>) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            feeds,
            timeout: DEFAULT_FEED_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn feeds(&self) -> &[String] {
        &self.feeds
    }

    pub fn default_feed(&self) -> Option<&str> {
        self.feeds.first().map(String::as_str)
    }

    /// Fetches `feed_url`, or the default feed when `None`. One attempt, no
    /// retries; network, parse and empty-feed failures are all errors.
    pub async fn fetch_latest(&self, feed_url: Option<&str>) -> Result<NewsRecord> {
        let url = match feed_url.or_else(|| self.default_feed()) {
            Some(url) => url,
            None => return Err(LectorError::Config("no feed sources configured".into())),
        };
        Url::parse(url)?;

        match self.fetcher.fetch(url, self.timeout).await? {
            FetchResult::Content { body, .. } => {
                let record = self.normalizer.latest(url, &body)?;
                tracing::info!(feed = url, title = %record.title, "fetched latest feed entry");
                Ok(record)
            }
            FetchResult::Status(code) => Err(LectorError::Other(format!(
                "feed {} returned HTTP {}",
                url, code
            ))),
        }
    }
}

/// The default feed as a fallback-chain tier.
pub struct FeedSource {
    fetcher: FeedFetcher,
}

impl FeedSource {
    pub fn new(fetcher: FeedFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl LessonSource for FeedSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Feed
    }

    async fn fetch(&self) -> Option<NewsRecord> {
        match self.fetcher.fetch_latest(None).await {
            Ok(record) => record.into_valid(),
            Err(e) => {
                tracing::warn!(error = %e, "feed source unavailable");
                None
            }
        }
    }
}
