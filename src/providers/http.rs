use super::util::{RetryPolicy, with_retry};
use crate::core::config::HttpConfig;
use crate::core::fetch::Fetcher;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// [`Fetcher`] backed by a shared `reqwest` client with a request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            timeout,
            retry: RetryPolicy {
                retries: config.retries,
                delay: Duration::from_millis(config.retry_delay_ms),
            },
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(name = "HttpFetch", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = with_retry(
            || async move {
                self.client
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
            },
            self.retry,
        )
        .await
        .map_err(|e| {
            if e.is_timeout() {
                anyhow!("Request timed out after {}s: {}", self.timeout.as_secs(), url)
            } else {
                anyhow!("Request error: {} for URL: {}", e, url)
            }
        })?;

        debug!(status = %response.status(), "Received response");
        let body = response
            .bytes()
            .await
            .map_err(|e| anyhow!("Failed to read response body from {}: {}", url, e))?;
        Ok(body.to_vec())
    }
}
