use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Creates a right-aligned cell for "N/A" values, with error-specific styling.
pub fn na_cell(has_error: bool) -> Cell {
    let color = if has_error {
        Color::Red
    } else {
        Color::DarkGrey
    };
    Cell::new("N/A")
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Price cell: red "N/A" when no provider answered, grey when the provider
/// reported something that is not a number.
pub fn price_cell(price: Option<f64>) -> Cell {
    match price {
        None => na_cell(true),
        Some(p) if p.is_nan() => na_cell(false),
        Some(p) => Cell::new(format_price(p)).set_alignment(CellAlignment::Right),
    }
}

/// Prices below one keep more decimals so small caps stay readable.
pub fn format_price(price: f64) -> String {
    if price.abs() >= 1.0 || price == 0.0 {
        format!("{price:.2}")
    } else {
        format!("{price:.8}")
    }
}

/// Creates a ticking spinner with a message.
pub fn new_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(64000.123), "64000.12");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(0.000123), "0.00012300");
        assert_eq!(format_price(f64::NAN), "NaN");
    }

    #[test]
    fn test_price_cell() {
        assert_eq!(price_cell(Some(1.5)).content(), "1.50");
        assert_eq!(price_cell(None).content(), "N/A");
        assert_eq!(price_cell(Some(f64::NAN)).content(), "N/A");
    }
}
