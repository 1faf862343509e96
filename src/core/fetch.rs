//! Transport abstraction used by providers to download ticker data.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the raw response body for `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
