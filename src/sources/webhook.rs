use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::app::LectorError;
use crate::domain::news::clean_title;
use crate::domain::{NewsRecord, SourceKind};
use crate::fetcher::{FetchResult, Fetcher};
use crate::sources::LessonSource;

pub const DEFAULT_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a webhook call produced no record.
///
/// All of these are expected while the automation side is cold-starting or
/// offline, so they are logged and turned into absence.
#[derive(Error, Debug)]
pub enum WebhookMiss {
    #[error("webhook returned HTTP {0}")]
    Status(u16),

    #[error("webhook timed out")]
    Timeout,

    #[error("webhook unreachable: {0}")]
    Unreachable(String),

    #[error("webhook signalled {0}")]
    Marker(&'static str),

    #[error("webhook body malformed: {0}")]
    Malformed(String),

    #[error("webhook record has neither title nor summary")]
    Empty,
}

/// Pulls a pre-curated news record from an automation webhook.
pub struct WebhookFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl WebhookFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    /// Single GET against `url`. Never retries, never errors: every miss is
    /// logged and returned as `None`.
    pub async fn fetch_from_webhook(&self, url: &str, timeout: Duration) -> Option<NewsRecord> {
        match self.try_fetch(url, timeout).await {
            Ok(record) => {
                tracing::info!(url, title = %record.title, "webhook delivered news");
                Some(record)
            }
            Err(miss) => {
                tracing::warn!(url, reason = %miss, "webhook produced no news");
                None
            }
        }
    }

    pub async fn try_fetch(&self, url: &str, timeout: Duration) -> Result<NewsRecord, WebhookMiss> {
        let response = self.fetcher.fetch(url, timeout).await.map_err(|e| match e {
            LectorError::Timeout(_) => WebhookMiss::Timeout,
            other => WebhookMiss::Unreachable(other.to_string()),
        })?;

        match response {
            FetchResult::Content { status: 200, body } => decode(&body),
            // 202 and friends mean the automation has not produced a record yet
            FetchResult::Content { status, .. } => Err(WebhookMiss::Status(status)),
            FetchResult::Status(code) => Err(WebhookMiss::Status(code)),
        }
    }
}

/// Decodes a webhook body into a record.
///
/// Accepts a JSON object, or a non-empty array whose first element is one.
/// A truthy `error` or `fallback` field means the automation had nothing
/// fresh to give.
pub fn decode(body: &[u8]) -> Result<NewsRecord, WebhookMiss> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| WebhookMiss::Malformed(e.to_string()))?;

    let value = match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| WebhookMiss::Malformed("empty array".into()))?,
        other => other,
    };

    let Value::Object(fields) = &value else {
        return Err(WebhookMiss::Malformed("expected a JSON object".into()));
    };

    if fields.get("error").is_some_and(truthy) {
        return Err(WebhookMiss::Marker("error"));
    }
    if fields.get("fallback").is_some_and(truthy) {
        return Err(WebhookMiss::Marker("fallback"));
    }

    let mut record: NewsRecord =
        serde_json::from_value(value).map_err(|e| WebhookMiss::Malformed(e.to_string()))?;
    record.title = clean_title(&record.title);

    record.into_valid().ok_or(WebhookMiss::Empty)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// The configured webhook as a fallback-chain tier.
pub struct WebhookSource {
    fetcher: WebhookFetcher,
    url: String,
    timeout: Duration,
}

impl WebhookSource {
    pub fn new(fetcher: WebhookFetcher, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            fetcher,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl LessonSource for WebhookSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Webhook
    }

    async fn fetch(&self) -> Option<NewsRecord> {
        self.fetcher.fetch_from_webhook(&self.url, self.timeout).await
    }
}
