use crate::core::adapter::{CoinAdapter, join_url};
use crate::core::coin::{Coin, CoinMap};
use reqwest::Url;
use serde_json::Value;

const QUOTE_CURRENCY: &str = "USD";

/// CryptoCompare has no all-coins ticker, so every refresh asks for the
/// symbol being looked up.
pub struct CryptoCompareAdapter;

impl CoinAdapter for CryptoCompareAdapter {
    fn name(&self) -> &'static str {
        "cryptocompare"
    }

    fn all_coins_url(&self, base_url: &str, symbol: &str) -> String {
        let endpoint = join_url(base_url, "/data/pricemultifull");
        let params = [("fsyms", symbol), ("tsyms", QUOTE_CURRENCY)];
        match Url::parse_with_params(&endpoint, &params) {
            Ok(url) => url.into(),
            // The fetch reports the bad base URL.
            Err(_) => endpoint,
        }
    }

    /// `{"RAW": {"BTC": {"USD": {"PRICE": 64000.1, ...}}}, "DISPLAY": {...}}`
    fn parse_all_coin_data(&self, raw: &Value) -> CoinMap {
        let mut coins = CoinMap::new();
        let Some(by_symbol) = raw.get("RAW").and_then(Value::as_object) else {
            return coins;
        };

        for (symbol, quotes) in by_symbol {
            if let Some(coin) = quotes.get(QUOTE_CURRENCY).and_then(Coin::from_value) {
                self.duplicate_policy()
                    .insert(&mut coins, symbol.clone(), coin);
            }
        }
        coins
    }

    fn coin_price_key(&self) -> &'static str {
        "PRICE"
    }

    fn requires_symbol(&self) -> bool {
        true
    }
}
