use super::ui;
use crate::core::CoinQuery;
use crate::providers::ProviderKind;
use comfy_table::{Cell, Color};

/// Lists every known provider and whether this configuration registered it.
pub fn render_providers(query: &CoinQuery) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Provider"),
        ui::header_cell("Status"),
        ui::header_cell("Base URL"),
        ui::header_cell("Price key"),
        ui::header_cell("Duplicates"),
    ]);

    for kind in ProviderKind::ALL {
        let adapter = kind.adapter();
        let registered = query.registry().get(kind.name());

        let mut name = kind.name().to_string();
        if kind.name() == query.default_service() {
            name.push_str(" (default)");
        }
        let (status, base_url) = match &registered {
            Some(service) => (
                Cell::new("enabled").fg(Color::Green),
                Cell::new(service.base_url()),
            ),
            None => (
                Cell::new("dormant").fg(Color::DarkGrey),
                Cell::new(kind.default_base_url()).fg(Color::DarkGrey),
            ),
        };

        table.add_row(vec![
            Cell::new(name),
            status,
            base_url,
            Cell::new(adapter.coin_price_key()),
            Cell::new(adapter.duplicate_policy().to_string()),
        ]);
    }

    let mut output = table.to_string();
    if query.registry().get(query.default_service()).is_none() {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!(
                    "Default service '{}' is not registered",
                    query.default_service()
                ),
                ui::StyleType::Error
            )
        ));
    }
    output
}
