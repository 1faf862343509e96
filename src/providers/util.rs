use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// How often and how patiently a failed request is repeated.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retry attempts after the first run.
    pub retries: usize,
    pub delay: Duration,
}

/// Only transient failures are worth repeating: timeouts, connection errors,
/// throttling and server errors.
fn is_transient(err: &reqwest::Error) -> bool {
    if err.is_timeout() || err.is_connect() {
        return true;
    }
    err.status()
        .is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
}

/// Retries an async request according to `policy`
///
/// # Returns
/// Either the successful result or the last error. Non-transient errors are
/// returned immediately.
pub async fn with_retry<F, Fut, T>(mut operation: F, policy: RetryPolicy) -> Result<T, reqwest::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) => {
                if attempt > policy.retries || !is_transient(&err) {
                    return Err(err);
                }
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt, policy.retries, err
                );
                attempt += 1;
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}
