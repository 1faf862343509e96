//! Capability set every ticker API adapter implements.

use super::coin::{Coin, CoinMap, to_number};
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::fmt::Display;

/// How an adapter resolves several entries sharing one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the first entry in response order.
    FirstWins,
    /// Keep the entry whose named attribute is numerically largest.
    HighestWins(&'static str),
}

impl Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::FirstWins => write!(f, "first wins"),
            DuplicatePolicy::HighestWins(attr) => write!(f, "highest {attr} wins"),
        }
    }
}

impl DuplicatePolicy {
    /// Inserts `coin` under `symbol`, honoring the policy when the symbol is taken.
    pub fn insert(self, coins: &mut CoinMap, symbol: String, coin: Coin) {
        match coins.entry(symbol) {
            Entry::Vacant(slot) => {
                slot.insert(coin);
            }
            Entry::Occupied(mut slot) => match self {
                DuplicatePolicy::FirstWins => {}
                DuplicatePolicy::HighestWins(attr) => {
                    if rank(&coin, attr) > rank(slot.get(), attr) {
                        slot.insert(coin);
                    }
                }
            },
        }
    }
}

// Unparseable values never beat a real number.
fn rank(coin: &Coin, attr: &str) -> f64 {
    let n = coin.get(attr).map_or(f64::NAN, to_number);
    if n.is_nan() { f64::NEG_INFINITY } else { n }
}

/// Provider specific behavior. Shared lookup and refresh logic lives in
/// [`CoinService`](super::service::CoinService), which drives an adapter.
pub trait CoinAdapter: Send + Sync {
    /// Lowercase registry name.
    fn name(&self) -> &'static str;

    /// Endpoint returning the provider's tickers. Single-pair providers build
    /// it from `symbol`; bulk providers ignore it.
    fn all_coins_url(&self, base_url: &str, symbol: &str) -> String;

    /// Normalizes a decoded response body into a symbol to coin map.
    fn parse_all_coin_data(&self, raw: &Value) -> CoinMap;

    /// Attribute holding the coin's price.
    fn coin_price_key(&self) -> &'static str;

    fn duplicate_policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::FirstWins
    }

    /// Whether [`all_coins_url`](Self::all_coins_url) needs a concrete symbol.
    fn requires_symbol(&self) -> bool {
        false
    }
}

/// Joins a base URL and an endpoint path without doubling the slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coin(value: Value) -> Coin {
        Coin::from_value(&value).unwrap()
    }

    #[test]
    fn test_first_wins_keeps_first() {
        let mut coins = CoinMap::new();
        let policy = DuplicatePolicy::FirstWins;
        policy.insert(&mut coins, "BTC".into(), coin(json!({"id": "first"})));
        policy.insert(&mut coins, "BTC".into(), coin(json!({"id": "second"})));

        assert_eq!(coins.len(), 1);
        assert_eq!(coins["BTC"].get("id"), Some(&json!("first")));
    }

    #[test]
    fn test_highest_wins_keeps_larger() {
        let mut coins = CoinMap::new();
        let policy = DuplicatePolicy::HighestWins("market_cap_usd");
        policy.insert(&mut coins, "BTC".into(), coin(json!({"market_cap_usd": "100"})));
        policy.insert(&mut coins, "BTC".into(), coin(json!({"market_cap_usd": "200"})));
        policy.insert(&mut coins, "BTC".into(), coin(json!({"market_cap_usd": "150"})));

        assert_eq!(coins["BTC"].get("market_cap_usd"), Some(&json!("200")));
    }

    #[test]
    fn test_highest_wins_prefers_numeric_over_null() {
        let mut coins = CoinMap::new();
        let policy = DuplicatePolicy::HighestWins("market_cap_usd");
        policy.insert(&mut coins, "X".into(), coin(json!({"market_cap_usd": null})));
        policy.insert(&mut coins, "X".into(), coin(json!({"market_cap_usd": "1"})));

        assert_eq!(coins["X"].get("market_cap_usd"), Some(&json!("1")));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://a.io/", "/v1"), "http://a.io/v1");
        assert_eq!(join_url("http://a.io", "/v1"), "http://a.io/v1");
    }
}
