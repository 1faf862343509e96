use crate::core::adapter::{CoinAdapter, join_url};
use crate::core::coin::{Coin, CoinMap};
use serde_json::Value;

/// KuCoin all-tickers snapshot, symbols like `BTC-USDT`.
pub struct KuCoinAdapter;

impl CoinAdapter for KuCoinAdapter {
    fn name(&self) -> &'static str {
        "kucoin"
    }

    fn all_coins_url(&self, base_url: &str, _symbol: &str) -> String {
        join_url(base_url, "/api/v1/market/allTickers")
    }

    /// `{"code": "200000", "data": {"time": ..., "ticker": [{"symbol": ..., "last": ...}]}}`
    fn parse_all_coin_data(&self, raw: &Value) -> CoinMap {
        let mut coins = CoinMap::new();
        let tickers = raw
            .pointer("/data/ticker")
            .and_then(Value::as_array)
            .into_iter()
            .flatten();

        for entry in tickers {
            let Some(symbol) = entry.get("symbol").and_then(Value::as_str) else {
                continue;
            };
            if let Some(coin) = Coin::from_value(entry) {
                self.duplicate_policy()
                    .insert(&mut coins, symbol.to_string(), coin);
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
    fn test_parse_tickers() {
        let raw = json!({
            "code": "200000",
            "data": {
                "time": 1700000000000u64,
                "ticker": [
                    {"symbol": "BTC-USDT", "symbolName": "BTC-USDT", "last": "64000.1"},
                    {"symbol": "BTC-USDT", "symbolName": "duplicate", "last": "1"},
                    {"symbol": "ETH-USDT", "last": null}
                ]
            }
        });

        let coins = KuCoinAdapter.parse_all_coin_data(&raw);

        assert_eq!(coins.len(), 2);
        assert_eq!(coins["BTC-USDT"].float_attr("last"), 64000.1);
        assert!(coins["ETH-USDT"].float_attr("last").is_nan());
    }

    #[test]
    fn test_error_code_is_empty() {
        let raw = json!({"code": "429000", "msg": "Too Many Requests"});
        assert!(KuCoinAdapter.parse_all_coin_data(&raw).is_empty());
    }
}
