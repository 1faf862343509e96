//! Lazy fetch-and-cache behavior shared by every provider.

use super::adapter::CoinAdapter;
use super::coin::{Coin, CoinMap, fallback_number};
use super::fetch::Fetcher;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument};

/// Bookkeeping for the current refresh cycle.
///
/// A cycle starts with each explicit refresh. Symbols that were still missing
/// after a lazy refresh are remembered so they do not trigger another fetch
/// until the next cycle, even when other misses replace the map meanwhile.
#[derive(Debug, Default)]
struct RefreshCycle {
    misses: HashSet<String>,
    last_symbol: Option<String>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// A provider: an adapter plus the coin map fetched through it.
pub struct CoinService {
    adapter: Box<dyn CoinAdapter>,
    base_url: String,
    fetcher: Arc<dyn Fetcher>,
    coins: RwLock<Arc<CoinMap>>,
    cycle: Mutex<RefreshCycle>,
}

impl CoinService {
    pub fn new(adapter: Box<dyn CoinAdapter>, base_url: &str, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            adapter,
            base_url: base_url.to_string(),
            fetcher,
            coins: RwLock::new(Arc::new(CoinMap::new())),
            cycle: Mutex::new(RefreshCycle::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.adapter.name()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current coin map. Readers always see a complete map.
    pub async fn coins(&self) -> Arc<CoinMap> {
        Arc::clone(&*self.coins.read().await)
    }

    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.cycle.lock().await.refreshed_at
    }

    async fn lookup(&self, symbol: &str) -> Option<Coin> {
        self.coins.read().await.get(symbol).cloned()
    }

    /// Returns the coin for `symbol`, refreshing the whole map once on a miss.
    pub async fn get_coin(&self, symbol: &str) -> Option<Coin> {
        if let Some(coin) = self.lookup(symbol).await {
            return Some(coin);
        }

        let mut cycle = self.cycle.lock().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(coin) = self.lookup(symbol).await {
            return Some(coin);
        }
        if cycle.misses.contains(symbol) {
            debug!(provider = self.name(), symbol, "Symbol already missed this cycle");
            return None;
        }

        debug!(provider = self.name(), symbol, "Coin map miss, refreshing");
        cycle.last_symbol = Some(symbol.to_string());
        self.refresh(&mut cycle, symbol).await;

        let coin = self.lookup(symbol).await;
        if coin.is_none() {
            cycle.misses.insert(symbol.to_string());
        }
        coin
    }

    /// `coin[attr]` when present, otherwise `fallback`.
    pub async fn get_coin_attr(
        &self,
        symbol: &str,
        attr: &str,
        fallback: Option<Value>,
    ) -> Option<Value> {
        match self.get_coin(symbol).await {
            Some(coin) => coin.get(attr).cloned().or(fallback),
            None => fallback,
        }
    }

    /// Numeric attribute. Falls back only when the coin itself is missing; a
    /// non-numeric attribute on an existing coin is `NaN`.
    pub async fn get_coin_float_attr(
        &self,
        symbol: &str,
        attr: &str,
        fallback: Option<Value>,
    ) -> f64 {
        match self.get_coin(symbol).await {
            Some(coin) => coin.float_attr(attr),
            None => fallback_number(fallback.as_ref()),
        }
    }

    pub async fn get_coin_price(&self, symbol: &str) -> f64 {
        self.get_coin_float_attr(symbol, self.adapter.coin_price_key(), Some(Value::from(0)))
            .await
    }

    /// Refreshes the coin map regardless of what is cached and starts a new
    /// cycle, so remembered misses are looked up again.
    ///
    /// Single-symbol providers reuse the last queried symbol and are skipped
    /// when nothing has been queried yet.
    pub async fn force_refresh(&self) {
        let mut cycle = self.cycle.lock().await;
        let symbol = match (&cycle.last_symbol, self.adapter.requires_symbol()) {
            (Some(symbol), _) => symbol.clone(),
            (None, false) => String::new(),
            (None, true) => {
                debug!(provider = self.name(), "No symbol queried yet, skipping refresh");
                return;
            }
        };
        self.refresh(&mut cycle, &symbol).await;
        cycle.misses.clear();
    }

    #[instrument(name = "CoinRefresh", skip(self, cycle), fields(provider = self.name()))]
    async fn refresh(&self, cycle: &mut RefreshCycle, symbol: &str) {
        let url = self.adapter.all_coins_url(&self.base_url, symbol);
        debug!("Requesting ticker data from {}", url);

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, url = %url, "Ticker request failed, keeping previous data");
                return;
            }
        };

        let Some(coins) = self.decode(&body) else {
            return;
        };

        info!(count = coins.len(), "Replaced coin map");
        *self.coins.write().await = Arc::new(coins);
        cycle.refreshed_at = Some(Utc::now());
    }

    fn decode(&self, body: &[u8]) -> Option<CoinMap> {
        if body.iter().all(u8::is_ascii_whitespace) {
            debug!("Empty response body");
            return Some(CoinMap::new());
        }
        match serde_json::from_slice::<Value>(body) {
            Ok(raw) => Some(self.adapter.parse_all_coin_data(&raw)),
            Err(e) => {
                error!(
                    error = ?e,
                    response = %String::from_utf8_lossy(body),
                    "Failed to parse ticker response"
                );
                None
            }
        }
    }
}
