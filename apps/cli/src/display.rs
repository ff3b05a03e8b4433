//! Text blocks printed by the menu handlers.
//!
//! Each function returns the block as a `String` (lines joined with `\n`)
//! so handlers decide where it goes and tests can compare it directly.

use smartmart_core::{CartView, CatalogEntry, ReceiptLayout, NAME_COLUMN_WIDTH};

use crate::state::AppConfig;

/// Main menu header and options.
pub fn menu(config: &AppConfig) -> String {
    [
        format!(
            "====== {} BILLING SYSTEM ======",
            config.store_name.to_uppercase()
        ),
        "1. Show Products".to_string(),
        "2. Add Item to Cart".to_string(),
        "3. View Cart".to_string(),
        "4. Generate Bill".to_string(),
        "5. Exit".to_string(),
    ]
    .join("\n")
}

/// `Available Products:` followed by one `<Name> ₹<price>` line per product.
pub fn product_listing(config: &AppConfig, products: &[CatalogEntry]) -> String {
    let mut lines = Vec::with_capacity(products.len() + 3);
    lines.push("Available Products:".to_string());
    lines.push(ReceiptLayout::light_rule());
    for entry in products {
        lines.push(format!(
            "{:<width$} {}",
            entry.display_name(),
            config.format_price(entry.unit_price),
            width = NAME_COLUMN_WIDTH
        ));
    }
    lines.push(ReceiptLayout::light_rule());
    lines.join("\n")
}

/// Cart contents with the untaxed subtotal, or `Cart is empty.`
pub fn cart_listing(layout: &ReceiptLayout, view: &CartView) -> String {
    if view.items.is_empty() {
        return "Cart is empty.".to_string();
    }

    let mut lines = Vec::with_capacity(view.items.len() + 5);
    lines.push("Your Cart:".to_string());
    lines.push(ReceiptLayout::light_rule());
    lines.extend(view.items.iter().map(|item| layout.format_line_item(item)));
    lines.push(ReceiptLayout::light_rule());
    lines.push(format!("Subtotal: {}", layout.plain_amount(view.subtotal)));
    lines.push(ReceiptLayout::light_rule());
    lines.join("\n")
}
