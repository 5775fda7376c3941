pub mod http_fetcher;

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

#[derive(Debug)]
pub enum FetchResult {
    /// 2xx response with its status and body
    Content { status: u16, body: Vec<u8> },
    /// Any other status code; the body is not read
    Status(u16),
}

/// One GET, one network attempt, bounded by `timeout`.
///
/// Timeouts surface as [`LectorError::Timeout`](crate::app::LectorError::Timeout),
/// connection failures as `LectorError::Http`.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResult>;
}
