use super::ui;
use crate::core::CoinQuery;
use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::Cell;
use futures::future::join_all;
use serde_json::Value;

/// One row of the price table.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub symbol: String,
    /// `None` when no provider could be resolved.
    pub price: Option<f64>,
}

pub async fn fetch_prices(
    query: &CoinQuery,
    symbols: &[String],
    service: Option<&str>,
) -> Vec<PriceRow> {
    let lookups = symbols.iter().map(|symbol| async move {
        PriceRow {
            symbol: symbol.clone(),
            price: query.get_coin_price(symbol, service).await,
        }
    });
    join_all(lookups).await
}

/// Renders prices as a table headed by the provider that served them and the
/// time its coin map was last replaced.
pub fn render_prices(
    provider: Option<&str>,
    refreshed_at: Option<DateTime<Utc>>,
    rows: &[PriceRow],
) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Symbol"), ui::header_cell("Price")]);
    for row in rows {
        table.add_row(vec![Cell::new(&row.symbol), ui::price_cell(row.price)]);
    }

    let provider = match provider {
        Some(name) => ui::style_text(name, ui::StyleType::Title),
        None => ui::style_text("no provider available", ui::StyleType::Error),
    };
    let updated = match refreshed_at {
        Some(at) => format!("updated {}", at.format("%H:%M:%S UTC")),
        None => "never updated".to_string(),
    };
    let updated = ui::style_text(&updated, ui::StyleType::Subtle);
    format!("Provider: {provider} ({updated})\n\n{table}")
}

pub async fn show_prices(query: &CoinQuery, symbols: &[String], service: Option<&str>) -> Result<()> {
    let rows = fetch_prices(query, symbols, service).await;
    let output = match query.resolve_provider(service).await {
        Some(provider) => render_prices(Some(provider.name()), provider.refreshed_at().await, &rows),
        None => render_prices(None, None, &rows),
    };
    println!("{output}");
    Ok(())
}

/// Text shown for an attribute lookup; strings are printed without quotes.
pub fn render_attr(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => ui::style_text("N/A", ui::StyleType::Subtle),
    }
}

pub async fn show_attr(
    query: &CoinQuery,
    symbol: &str,
    attr: &str,
    service: Option<&str>,
) -> Result<()> {
    let value = query.get_coin_attr(symbol, attr, service).await;
    println!("{}", render_attr(value.as_ref()));
    Ok(())
}

pub async fn show_float_attr(
    query: &CoinQuery,
    symbol: &str,
    attr: &str,
    service: Option<&str>,
) -> Result<()> {
    match query.get_coin_float_attr(symbol, attr, service).await {
        Some(value) => println!("{value}"),
        None => println!("{}", ui::style_text("N/A", ui::StyleType::Subtle)),
    }
    Ok(())
}
