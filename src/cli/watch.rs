use super::quote;
use super::ui;
use crate::core::CoinQuery;
use anyhow::Result;
use std::time::Duration;
use tracing::debug;

/// Prints prices every `interval`, refreshing the providers in use between
/// rounds. Runs forever when `rounds` is `None`.
pub async fn watch_prices(
    query: &CoinQuery,
    symbols: &[String],
    service: Option<&str>,
    interval: Duration,
    rounds: Option<usize>,
) -> Result<()> {
    let mut round = 0;
    loop {
        round += 1;
        debug!("Watch round {}", round);
        quote::show_prices(query, symbols, service).await?;

        if rounds.is_some_and(|limit| round >= limit) {
            return Ok(());
        }

        let spinner = ui::new_spinner(format!("Next refresh in {}s", interval.as_secs()));
        tokio::time::sleep(interval).await;
        spinner.finish_and_clear();

        query.refresh_all_active_providers().await;
    }
}
