//! Provider abstraction and symbol resolution

pub mod adapter;
pub mod cache;
pub mod coin;
pub mod config;
pub mod fetch;
pub mod log;
pub mod query;
pub mod registry;
pub mod service;

// Re-export main types for cleaner imports
pub use adapter::{CoinAdapter, DuplicatePolicy};
pub use coin::{Coin, CoinMap};
pub use fetch::Fetcher;
pub use query::CoinQuery;
pub use registry::ProviderRegistry;
pub use service::CoinService;
