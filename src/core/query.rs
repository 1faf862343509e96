//! Public query surface: resolves a service name to a provider and delegates.

use super::cache::Cache;
use super::registry::ProviderRegistry;
use super::service::CoinService;
use futures::future::join_all;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the registry together with the providers resolved so far.
pub struct CoinQuery {
    registry: ProviderRegistry,
    default_service: String,
    // Keyed by the requested name; "" stands for the default service.
    active: Cache<String, Arc<CoinService>>,
}

impl CoinQuery {
    pub fn new(registry: ProviderRegistry, default_service: &str) -> Self {
        Self {
            registry,
            default_service: default_service.to_string(),
            active: Cache::new(),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn default_service(&self) -> &str {
        &self.default_service
    }

    /// Resolves `service`, falling back to the default service when the name
    /// is unknown. Successful resolutions are remembered per requested name.
    pub async fn resolve_provider(&self, service: Option<&str>) -> Option<Arc<CoinService>> {
        let requested = service.unwrap_or_default();
        let resolved = self
            .active
            .get_or_insert_with(requested.to_string(), || {
                self.registry.get(requested).or_else(|| {
                    debug!(
                        "No provider named '{}', trying default '{}'",
                        requested, self.default_service
                    );
                    self.registry.get(&self.default_service)
                })
            })
            .await;

        if resolved.is_none() {
            warn!(
                "Unable to resolve provider '{}' (default '{}')",
                requested, self.default_service
            );
        }
        resolved
    }

    /// Price of `symbol`, `0.0` when the provider does not list it.
    /// `None` when no provider could be resolved.
    pub async fn get_coin_price(&self, symbol: &str, service: Option<&str>) -> Option<f64> {
        let provider = self.resolve_provider(service).await?;
        Some(provider.get_coin_price(symbol).await)
    }

    pub async fn get_coin_attr(
        &self,
        symbol: &str,
        attr: &str,
        service: Option<&str>,
    ) -> Option<Value> {
        let provider = self.resolve_provider(service).await?;
        provider.get_coin_attr(symbol, attr, None).await
    }

    pub async fn get_coin_float_attr(
        &self,
        symbol: &str,
        attr: &str,
        service: Option<&str>,
    ) -> Option<f64> {
        let provider = self.resolve_provider(service).await?;
        Some(provider.get_coin_float_attr(symbol, attr, None).await)
    }

    /// Refreshes each provider resolved so far exactly once.
    pub async fn refresh_all_active_providers(&self) {
        let mut seen = HashSet::new();
        let providers: Vec<Arc<CoinService>> = self
            .active
            .values()
            .await
            .into_iter()
            .filter(|p| seen.insert(p.name()))
            .collect();

        info!("Refreshing {} active provider(s)", providers.len());
        join_all(providers.iter().map(|p| p.force_refresh())).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::adapter::CoinAdapter;
    use crate::core::service::tests::{BODY, MockAdapter, MockFetcher, URL};
    use serde_json::json;

    struct Renamed(&'static str);

    impl CoinAdapter for Renamed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn all_coins_url(&self, base_url: &str, symbol: &str) -> String {
            MockAdapter {
                single_symbol: false,
            }
            .all_coins_url(base_url, symbol)
        }

        fn parse_all_coin_data(&self, raw: &Value) -> crate::core::coin::CoinMap {
            MockAdapter {
                single_symbol: false,
            }
            .parse_all_coin_data(raw)
        }

        fn coin_price_key(&self) -> &'static str {
            "price_usd"
        }
    }

    fn query(fetcher: &Arc<MockFetcher>, default_service: &str) -> CoinQuery {
        let mut registry = ProviderRegistry::new();
        for name in ["alpha", "beta"] {
            registry.register(CoinService::new(
                Box::new(Renamed(name)),
                "http://mock",
                Arc::clone(fetcher) as _,
            ));
        }
        CoinQuery::new(registry, default_service)
    }

    #[tokio::test]
    async fn test_unknown_service_falls_back_to_default() {
        let fetcher = Arc::new(MockFetcher::with_body(URL, BODY));
        let query = query(&fetcher, "beta");

        let provider = query.resolve_provider(Some("nonexistent-name")).await;
        assert_eq!(provider.map(|p| p.name()), Some("beta"));

        let provider = query.resolve_provider(None).await;
        assert_eq!(provider.map(|p| p.name()), Some("beta"));

        let provider = query.resolve_provider(Some("alpha")).await;
        assert_eq!(provider.map(|p| p.name()), Some("alpha"));
    }

    #[tokio::test]
    async fn test_unresolvable_provider_yields_none() {
        let fetcher = Arc::new(MockFetcher::with_body(URL, BODY));
        let query = query(&fetcher, "also-missing");

        assert!(query.resolve_provider(Some("nonexistent-name")).await.is_none());
        assert_eq!(query.get_coin_price("BTC", Some("nonexistent-name")).await, None);
        assert_eq!(query.get_coin_attr("BTC", "name", None).await, None);
        assert_eq!(
            query.get_coin_float_attr("BTC", "price_usd", None).await,
            None
        );
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_queries_delegate_to_provider() {
        let fetcher = Arc::new(MockFetcher::with_body(URL, BODY));
        let query = query(&fetcher, "alpha");

        assert_eq!(query.get_coin_price("BTC", None).await, Some(100.5));
        assert_eq!(query.get_coin_price("ETH", None).await, Some(0.0));
        assert_eq!(
            query.get_coin_attr("BTC", "name", Some("alpha")).await,
            Some(json!("Bitcoin"))
        );
        let name = query.get_coin_float_attr("BTC", "name", None).await;
        assert!(name.is_some_and(f64::is_nan));
    }

    #[tokio::test]
    async fn test_refresh_all_touches_each_active_provider_once() {
        let fetcher = Arc::new(MockFetcher::with_body(URL, BODY));
        let query = query(&fetcher, "alpha");

        // "alpha" is reached under three names but must refresh once.
        query.get_coin_price("BTC", None).await;
        query.get_coin_price("BTC", Some("alpha")).await;
        query.get_coin_price("BTC", Some("unknown")).await;
        query.get_coin_price("BTC", Some("beta")).await;
        assert_eq!(fetcher.calls(), 2);

        query.refresh_all_active_providers().await;
        assert_eq!(fetcher.calls(), 4);
    }

    #[tokio::test]
    async fn test_refresh_all_skips_unused_providers() {
        let fetcher = Arc::new(MockFetcher::with_body(URL, BODY));
        let query = query(&fetcher, "alpha");

        query.refresh_all_active_providers().await;
        assert_eq!(fetcher.calls(), 0);

        query.get_coin_price("BTC", Some("beta")).await;
        query.refresh_all_active_providers().await;
        assert_eq!(fetcher.calls(), 2);
    }
}
