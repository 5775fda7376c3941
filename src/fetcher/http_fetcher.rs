use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::{LectorError, Result};
use crate::fetcher::{FetchResult, Fetcher};

const USER_AGENT: &str = concat!("lector/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResult> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "non-success response");
            return Ok(FetchResult::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| classify(url, e))?.to_vec();

        Ok(FetchResult::Content {
            status: status.as_u16(),
            body,
        })
    }
}

fn classify(url: &str, err: reqwest::Error) -> LectorError {
    if err.is_timeout() {
        LectorError::Timeout(url.to_string())
    } else {
        LectorError::Http(err)
    }
}
