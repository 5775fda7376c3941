use std::sync::Arc;
use std::time::Duration;

use lector::app::AppContext;
use lector::config::Config;
use lector::domain::SourceKind;
use lector::fetcher::{FetchResult, Fetcher, HttpFetcher};
use lector::sources::{FeedFetcher, WebhookFetcher, WebhookMiss};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Tech</title>
    <item>
      <title>AI Breakthrough</title>
      <link>https://example.com/ai</link>
      <description>&lt;p&gt;New model released&lt;/p&gt;</description>
    </item>
  </channel>
</rss>"#;

/// Serves every connection with the same canned response after `delay`.
async fn serve(status: &'static str, content_type: &'static str, body: &'static str, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                tokio::time::sleep(delay).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    content_type,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}/", addr)
}

/// An address nothing listens on.
async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

fn http() -> Arc<dyn Fetcher + Send + Sync> {
    Arc::new(HttpFetcher::new().unwrap())
}

fn config(webhook: String, feed: String) -> Config {
    let mut config = Config::default();
    config.webhook.url = webhook;
    config.webhook.timeout_secs = 1;
    config.feeds.urls = vec![feed];
    config.feeds.timeout_secs = 2;
    config
}

#[tokio::test]
async fn http_fetcher_reports_status() {
    let url = serve("404 Not Found", "text/plain", "nope", Duration::ZERO).await;
    let result = http().fetch(&url, Duration::from_secs(2)).await.unwrap();
    assert!(matches!(result, FetchResult::Status(404)));
}

#[tokio::test]
async fn webhook_timeout_is_classified() {
    let url = serve("200 OK", "application/json", r#"{"title":"late"}"#, Duration::from_secs(3)).await;
    let webhook = WebhookFetcher::new(http());

    let miss = webhook
        .try_fetch(&url, Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(miss, WebhookMiss::Timeout));
}

#[tokio::test]
async fn webhook_connection_refused_is_absence() {
    let url = closed_port().await;
    let webhook = WebhookFetcher::new(http());

    assert!(matches!(
        webhook.try_fetch(&url, Duration::from_secs(1)).await,
        Err(WebhookMiss::Unreachable(_))
    ));
    assert!(webhook.fetch_from_webhook(&url, Duration::from_secs(1)).await.is_none());
}

#[tokio::test]
async fn feed_fetcher_reads_latest_entry() {
    let url = serve("200 OK", "application/rss+xml", RSS, Duration::ZERO).await;
    let fetcher = FeedFetcher::new(http(), vec![url]);

    let record = fetcher.fetch_latest(None).await.unwrap();
    assert_eq!(record.title, "AI Breakthrough");
    assert_eq!(record.link, "https://example.com/ai");
}

#[tokio::test]
async fn resolver_prefers_webhook() {
    let hook = serve(
        "200 OK",
        "application/json",
        r#"{"title":"Curated","summary":"<b>Picked</b> for you","link":"","published":"now"}"#,
        Duration::ZERO,
    )
    .await;
    let feed = serve("200 OK", "application/rss+xml", RSS, Duration::ZERO).await;

    let ctx = AppContext::with_fetcher(config(hook, feed), http());
    let lesson = ctx.resolver.resolve().await;

    assert_eq!(lesson.source, SourceKind::Webhook);
    assert!(lesson.text.contains("Today's news: Curated"));
    assert!(lesson.text.contains("Picked for you"));
}

#[tokio::test]
async fn resolver_skips_fallback_marker() {
    let hook = serve("200 OK", "application/json", r#"{"fallback": true}"#, Duration::ZERO).await;
    let feed = serve("200 OK", "application/rss+xml", RSS, Duration::ZERO).await;

    let ctx = AppContext::with_fetcher(config(hook, feed), http());
    let lesson = ctx.resolver.resolve().await;

    assert_eq!(lesson.source, SourceKind::Feed);
    assert!(lesson.text.lines().any(|l| l == "Today's news: AI Breakthrough"));
    assert!(lesson.text.lines().any(|l| l == "New model released"));
}

#[tokio::test]
async fn resolver_skips_accepted_but_pending_webhook() {
    let hook = serve("202 Accepted", "application/json", r#"{"title":"Queued"}"#, Duration::ZERO).await;
    let feed = serve("200 OK", "application/rss+xml", RSS, Duration::ZERO).await;

    let webhook = WebhookFetcher::new(http());
    assert!(matches!(
        webhook.try_fetch(&hook, Duration::from_secs(1)).await,
        Err(WebhookMiss::Status(202))
    ));

    let ctx = AppContext::with_fetcher(config(hook, feed), http());
    let lesson = ctx.resolver.resolve().await;

    assert_eq!(lesson.source, SourceKind::Feed);
    assert!(lesson.text.contains("Today's news: AI Breakthrough"));
}

#[tokio::test]
async fn resolver_falls_back_to_static() {
    let hook = serve("503 Service Unavailable", "text/plain", "cold start", Duration::ZERO).await;
    let feed = closed_port().await;

    let ctx = AppContext::with_fetcher(config(hook, feed), http());
    let first = ctx.resolver.resolve().await;
    let second = ctx.resolver.resolve().await;

    assert_eq!(first.source, SourceKind::Static);
    assert!(!first.text.is_empty());
    assert_eq!(first, second);

    let brief = ctx.brief().await;
    assert_eq!(brief.source(), SourceKind::Static);
    assert!(brief.instructions().contains("Artificial Intelligence"));
}
