use crate::core::adapter::{CoinAdapter, join_url};
use crate::core::coin::{Coin, CoinMap};
use serde_json::Value;

pub struct CoinCapAdapter;

impl CoinAdapter for CoinCapAdapter {
    fn name(&self) -> &'static str {
        "coincap"
    }

    fn all_coins_url(&self, base_url: &str, _symbol: &str) -> String {
        join_url(base_url, "/v2/assets?limit=2000")
    }

    /// `{"data": [{"symbol": "BTC", "priceUsd": "...", ...}], "timestamp": ...}`
    fn parse_all_coin_data(&self, raw: &Value) -> CoinMap {
        let mut coins = CoinMap::new();
        let entries = raw["data"].as_array().map(Vec::as_slice).unwrap_or_default();

        for entry in entries {
            let (Some(symbol), Some(coin)) = (
                entry.get("symbol").and_then(Value::as_str),
                Coin::from_value(entry),
            ) else {
                continue;
            };
            self.duplicate_policy()
                .insert(&mut coins, symbol.to_string(), coin);
        }
        coins
    }

    fn coin_price_key(&self) -> &'static str {
        "priceUsd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_entry_wins() {
        let raw = json!({
            "data": [
                {"id": "bitcoin", "symbol": "BTC", "priceUsd": "64000.12"},
                {"id": "bitcoin-bep2", "symbol": "BTC", "priceUsd": "63990.00"},
                {"id": "ethereum", "symbol": "ETH", "priceUsd": "3100.5"}
            ],
            "timestamp": 1700000000000u64
        });

        let coins = CoinCapAdapter.parse_all_coin_data(&raw);

        assert_eq!(coins.len(), 2);
        assert_eq!(coins["BTC"].get("id"), Some(&json!("bitcoin")));
        assert_eq!(coins["BTC"].float_attr("priceUsd"), 64000.12);
    }

    #[test]
    fn test_missing_data_is_empty() {
        assert!(CoinCapAdapter.parse_all_coin_data(&json!({})).is_empty());
        assert!(
            CoinCapAdapter
                .parse_all_coin_data(&json!({"error": "rate limited"}))
                .is_empty()
        );
    }
}
