use super::config::AppConfig;
use super::fetch::Fetcher;
use super::service::CoinService;
use crate::providers::ProviderKind;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Every enabled provider, keyed by name.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<CoinService>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers each provider kind that the configuration enables.
    pub fn from_config(config: &AppConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let mut registry = Self::new();

        for name in config.providers.keys() {
            if name.parse::<ProviderKind>().is_err() {
                warn!("Ignoring configuration for unknown provider: {}", name);
            }
        }

        for kind in ProviderKind::ALL {
            let settings = config.providers.get(kind.name());
            let enabled = settings
                .and_then(|s| s.enabled)
                .unwrap_or_else(|| kind.is_active());
            if !enabled {
                debug!("Provider {} is dormant", kind);
                continue;
            }
            let base_url = settings
                .and_then(|s| s.base_url.as_deref())
                .unwrap_or_else(|| kind.default_base_url());
            registry.register(CoinService::new(kind.adapter(), base_url, Arc::clone(&fetcher)));
        }

        registry
    }

    /// Adds a provider under its own name, replacing any previous entry.
    pub fn register(&mut self, service: CoinService) {
        debug!("Registering provider {} at {}", service.name(), service.base_url());
        self.providers
            .insert(service.name().to_string(), Arc::new(service));
    }

    pub fn get(&self, name: &str) -> Option<Arc<CoinService>> {
        self.providers.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
