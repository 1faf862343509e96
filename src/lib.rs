pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{CoinQuery, ProviderRegistry};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Price {
        symbols: Vec<String>,
        service: Option<String>,
    },
    Attr {
        symbol: String,
        attr: String,
        service: Option<String>,
    },
    FloatAttr {
        symbol: String,
        attr: String,
        service: Option<String>,
    },
    Providers,
    Watch {
        symbols: Vec<String>,
        service: Option<String>,
        interval_secs: u64,
        rounds: Option<usize>,
    },
}

/// Builds the query context: HTTP transport, registry and default service.
pub fn build_query(config: &AppConfig) -> Result<CoinQuery> {
    let fetcher = Arc::new(providers::http::HttpFetcher::new(&config.http)?);
    let registry = ProviderRegistry::from_config(config, fetcher);
    info!("Registered {} provider(s)", registry.len());
    Ok(CoinQuery::new(registry, &config.default_service))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let query = build_query(&config)?;

    match command {
        AppCommand::Price { symbols, service } => {
            cli::quote::show_prices(&query, &symbols, service.as_deref()).await
        }
        AppCommand::Attr {
            symbol,
            attr,
            service,
        } => cli::quote::show_attr(&query, &symbol, &attr, service.as_deref()).await,
        AppCommand::FloatAttr {
            symbol,
            attr,
            service,
        } => cli::quote::show_float_attr(&query, &symbol, &attr, service.as_deref()).await,
        AppCommand::Providers => {
            println!("{}", cli::providers::render_providers(&query));
            Ok(())
        }
        AppCommand::Watch {
            symbols,
            service,
            interval_secs,
            rounds,
        } => {
            cli::watch::watch_prices(
                &query,
                &symbols,
                service.as_deref(),
                Duration::from_secs(interval_secs),
                rounds,
            )
            .await
        }
    }
}
