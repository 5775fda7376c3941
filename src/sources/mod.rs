//! Content sources for the lesson fallback chain.
//!
//! Each tier implements [`LessonSource`]; the resolver walks them in order
//! and takes the first record it gets.

pub mod feed;
pub mod webhook;

use async_trait::async_trait;

use crate::domain::{NewsRecord, SourceKind};

pub use feed::{FeedFetcher, FeedSource};
pub use webhook::{WebhookFetcher, WebhookMiss, WebhookSource};

#[async_trait]
pub trait LessonSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Fetches one record. Failures are absorbed and logged; `None` means
    /// "try the next source".
    async fn fetch(&self) -> Option<NewsRecord>;
}
