use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::resolver::ContentResolver;
use crate::session::TutorBrief;
use crate::sources::{FeedFetcher, FeedSource, LessonSource, WebhookFetcher, WebhookSource};
use crate::vocabulary::VocabularyStore;

/// Explicitly constructed services handed to whatever starts sessions.
pub struct AppContext {
    pub config: Config,
    pub resolver: ContentResolver,
    pub vocabulary: VocabularyStore,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new()?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let resolver = Self::build_resolver(&config, fetcher);
        let vocabulary = VocabularyStore::connect(&config.vocabulary);

        Self {
            config,
            resolver,
            vocabulary,
        }
    }

    /// Webhook first, then the default feed.
    pub fn build_resolver(config: &Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> ContentResolver {
        let webhook = WebhookSource::new(
            WebhookFetcher::new(fetcher.clone()),
            config.webhook.url.clone(),
            config.webhook.timeout(),
        );
        let feed = FeedSource::new(
            FeedFetcher::new(fetcher, config.feeds.urls.clone()).with_timeout(config.feeds.timeout()),
        );

        let sources: Vec<Box<dyn LessonSource>> = vec![Box::new(webhook), Box::new(feed)];
        ContentResolver::new(sources)
    }

    pub async fn brief(&self) -> TutorBrief {
        TutorBrief::new(&self.resolver.resolve().await)
    }

    pub fn close(self) {
        self.vocabulary.close();
    }
}
