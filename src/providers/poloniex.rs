use crate::core::adapter::{CoinAdapter, join_url};
use crate::core::coin::{Coin, CoinMap};
use serde_json::Value;

/// Poloniex legacy public ticker, keyed by pair (`BTC_ETH`).
pub struct PoloniexAdapter;

impl CoinAdapter for PoloniexAdapter {
    fn name(&self) -> &'static str {
        "poloniex"
    }

    fn all_coins_url(&self, base_url: &str, _symbol: &str) -> String {
        join_url(base_url, "/public?command=returnTicker")
    }

    fn parse_all_coin_data(&self, raw: &Value) -> CoinMap {
        let mut coins = CoinMap::new();
        for (pair, ticker) in raw.as_object().into_iter().flatten() {
            if let Some(coin) = Coin::from_value(ticker) {
                self.duplicate_policy().insert(&mut coins, pair.clone(), coin);
            }
        }
        coins
    }

    fn coin_price_key(&self) -> &'static str {
        "last"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_pairs() {
        let raw = json!({
            "BTC_ETH": {"id": 148, "last": "0.05200000", "isFrozen": "0"},
            "USDT_BTC": {"id": 121, "last": "64000.00000000", "isFrozen": "0"},
            "error": "not a ticker"
        });

        let coins = PoloniexAdapter.parse_all_coin_data(&raw);

        assert_eq!(coins.len(), 2);
        assert_eq!(coins["USDT_BTC"].float_attr("last"), 64000.0);
        assert_eq!(coins["BTC_ETH"].get("id"), Some(&json!(148)));
    }
}
