use crate::core::adapter::{CoinAdapter, join_url};
use crate::core::coin::{Coin, CoinMap};
use serde_json::Value;

/// CoinGecko markets endpoint. Symbols come back lowercase ("btc") and are
/// stored exactly as returned.
pub struct CoinGeckoAdapter;

impl CoinAdapter for CoinGeckoAdapter {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    fn all_coins_url(&self, base_url: &str, _symbol: &str) -> String {
        join_url(
            base_url,
            "/api/v3/coins/markets?vs_currency=usd&order=market_cap_desc&per_page=250&page=1",
        )
    }

    fn parse_all_coin_data(&self, raw: &Value) -> CoinMap {
        let mut coins = CoinMap::new();
        for entry in raw.as_array().into_iter().flatten() {
            if let (Some(symbol), Some(coin)) = (
                entry.get("symbol").and_then(Value::as_str),
                Coin::from_value(entry),
            ) {
                self.duplicate_policy()
                    .insert(&mut coins, symbol.to_string(), coin);
            }
        }
        coins
    }

    fn coin_price_key(&self) -> &'static str {
        "current_price"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_markets() {
        let raw = json!([
            {"id": "bitcoin", "symbol": "btc", "current_price": 64000.5, "market_cap": 1.2e12},
            {"id": "batcoin", "symbol": "btc", "current_price": 0.01, "market_cap": 1000},
            {"id": "ethereum", "symbol": "eth", "current_price": 3100, "market_cap": 3.7e11}
        ]);

        let coins = CoinGeckoAdapter.parse_all_coin_data(&raw);

        assert_eq!(coins.len(), 2);
        assert_eq!(coins["btc"].get("id"), Some(&json!("bitcoin")));
        assert_eq!(coins["btc"].float_attr("current_price"), 64000.5);
        assert!(!coins.contains_key("BTC"));
    }

    #[test]
    fn test_error_object_is_empty() {
        let raw = json!({"status": {"error_code": 429, "error_message": "throttled"}});
        assert!(CoinGeckoAdapter.parse_all_coin_data(&raw).is_empty());
    }
}
