use crate::core::adapter::{CoinAdapter, join_url};
use crate::core::coin::{Coin, CoinMap};
use serde_json::Value;

/// Binance 24h ticker statistics. Symbols are trading pairs such as `ETHBTC`.
pub struct BinanceAdapter;

impl CoinAdapter for BinanceAdapter {
    fn name(&self) -> &'static str {
        "binance"
    }

    fn all_coins_url(&self, base_url: &str, _symbol: &str) -> String {
        join_url(base_url, "/api/v3/ticker/24hr")
    }

    fn parse_all_coin_data(&self, raw: &Value) -> CoinMap {
        let mut coins = CoinMap::new();
        for entry in raw.as_array().into_iter().flatten() {
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
        "lastPrice"
    }
}
