use crate::core::adapter::{CoinAdapter, join_url};
use crate::core::coin::{Coin, CoinMap};
use serde_json::{Map, Value};

/// Field names for the positional trading ticker arrays, after the symbol.
const TRADING_FIELDS: [&str; 10] = [
    "bid",
    "bid_size",
    "ask",
    "ask_size",
    "daily_change",
    "daily_change_relative",
    "last_price",
    "volume",
    "high",
    "low",
];

/// Bitfinex v2 tickers. Rows are positional arrays; funding rows (`f...`) are
/// skipped and the `t` prefix of trading pairs is dropped (`tBTCUSD` becomes
/// `BTCUSD`).
pub struct BitfinexAdapter;

impl BitfinexAdapter {
    fn trading_coin(row: &[Value]) -> Option<(String, Coin)> {
        let pair = row.first()?.as_str()?.strip_prefix('t')?;
        let mut attributes = Map::new();
        for (field, value) in TRADING_FIELDS.iter().zip(&row[1..]) {
            attributes.insert(field.to_string(), value.clone());
        }
        Some((pair.to_string(), Coin::new(attributes)))
    }
}

impl CoinAdapter for BitfinexAdapter {
    fn name(&self) -> &'static str {
        "bitfinex"
    }

    fn all_coins_url(&self, base_url: &str, _symbol: &str) -> String {
        join_url(base_url, "/v2/tickers?symbols=ALL")
    }

    fn parse_all_coin_data(&self, raw: &Value) -> CoinMap {
        let mut coins = CoinMap::new();
        let rows = raw.as_array().into_iter().flatten().filter_map(Value::as_array);
        for row in rows {
            if let Some((pair, coin)) = Self::trading_coin(row) {
                self.duplicate_policy().insert(&mut coins, pair, coin);
            }
        }
        coins
    }

    fn coin_price_key(&self) -> &'static str {
        "last_price"
    }
}
