use crate::core::adapter::{CoinAdapter, DuplicatePolicy, join_url};
use crate::core::coin::{Coin, CoinMap};
use serde_json::Value;
use tracing::debug;

const MARKET_CAP_KEY: &str = "market_cap_usd";

/// CoinMarketCap public ticker. One response lists every coin, and distinct
/// coins may share a symbol, so the larger market cap keeps the symbol.
pub struct CoinMarketCapAdapter;

impl CoinAdapter for CoinMarketCapAdapter {
    fn name(&self) -> &'static str {
        "coinmarketcap"
    }

    fn all_coins_url(&self, base_url: &str, _symbol: &str) -> String {
        join_url(base_url, "/v1/ticker/?limit=0")
    }

    fn parse_all_coin_data(&self, raw: &Value) -> CoinMap {
        let mut coins = CoinMap::new();
        let Some(entries) = raw.as_array() else {
            debug!("CoinMarketCap response is not an array");
            return coins;
        };

        for entry in entries {
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
        "price_usd"
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::HighestWins(MARKET_CAP_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicate_symbol_keeps_highest_market_cap() {
        let raw = json!([
            {"id": "small-btc", "symbol": "BTC", "price_usd": "1.0", "market_cap_usd": "100"},
            {"id": "bitcoin", "symbol": "BTC", "price_usd": "100.5", "market_cap_usd": "200"},
            {"id": "ethereum", "symbol": "ETH", "price_usd": "2000", "market_cap_usd": null}
        ]);

        let coins = CoinMarketCapAdapter.parse_all_coin_data(&raw);

        assert_eq!(coins.len(), 2);
        assert_eq!(coins["BTC"].get("id"), Some(&json!("bitcoin")));
        assert_eq!(coins["BTC"].float_attr("price_usd"), 100.5);
        assert_eq!(coins["ETH"].float_attr("price_usd"), 2000.0);
    }

    #[test]
    fn test_lower_market_cap_later_does_not_replace() {
        let raw = json!([
            {"id": "bitcoin", "symbol": "BTC", "market_cap_usd": "200"},
            {"id": "small-btc", "symbol": "BTC", "market_cap_usd": "100"}
        ]);

        let coins = CoinMarketCapAdapter.parse_all_coin_data(&raw);
        assert_eq!(coins["BTC"].get("id"), Some(&json!("bitcoin")));
    }

    #[test]
    fn test_unexpected_shapes() {
        assert!(
            CoinMarketCapAdapter
                .parse_all_coin_data(&json!({"error": "gone"}))
                .is_empty()
        );
        let coins = CoinMarketCapAdapter.parse_all_coin_data(&json!([{"id": "no-symbol"}, 3]));
        assert!(coins.is_empty());
    }

    #[test]
    fn test_url_ignores_symbol() {
        assert_eq!(
            CoinMarketCapAdapter.all_coins_url("https://api.coinmarketcap.com", "BTC"),
            "https://api.coinmarketcap.com/v1/ticker/?limit=0"
        );
    }
}
