//! # Receipt Formatting
//!
//! Renders a bill into the fixed-width receipt text that is shown on screen
//! and written to `bill.txt`.
//!
//! ## Layout
//! ```text
//! ===================================
//!  SMARTMART BILL
//! ===================================
//! Date: 01-03-2024 09:30:00
//! -----------------------------------
//! Milk            x 2   = ₹80
//! Bread           x 3   = ₹75
//! -----------------------------------
//! Subtotal: ₹155
//! Tax (18%): ₹27.9
//! Total: ₹182.9
//! Payment Method: UPI
//! ===================================
//! Thank you for shopping at SmartMart!
//! ===================================
//! ```
//!
//! Lines are joined with `\n` and there is no trailing newline. The layout is
//! kept byte-for-byte compatible with receipts printed by earlier releases.

use serde::{Deserialize, Serialize};

use crate::bill::Bill;
use crate::money::Money;
use crate::types::LineItem;
use crate::{CURRENCY_SYMBOL, DEFAULT_STORE_NAME, NAME_COLUMN_WIDTH, RECEIPT_WIDTH};

/// `DD-MM-YYYY HH:MM:SS`
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Store branding and currency used when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLayout {
    pub store_name: String,
    pub currency_symbol: String,
}

impl Default for ReceiptLayout {
    fn default() -> Self {
        ReceiptLayout {
            store_name: DEFAULT_STORE_NAME.to_string(),
            currency_symbol: CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl ReceiptLayout {
    /// Creates a layout for the given store name with the default currency.
    pub fn for_store(store_name: impl Into<String>) -> Self {
        ReceiptLayout {
            store_name: store_name.into(),
            ..ReceiptLayout::default()
        }
    }

    /// `===...` (35 characters).
    pub fn heavy_rule() -> String {
        "=".repeat(RECEIPT_WIDTH)
    }

    /// `---...` (35 characters).
    pub fn light_rule() -> String {
        "-".repeat(RECEIPT_WIDTH)
    }

    /// `" SMARTMART BILL"`
    pub fn title(&self) -> String {
        format!(" {} BILL", self.store_name.to_uppercase())
    }

    /// `"Thank you for shopping at SmartMart!"`
    pub fn footer(&self) -> String {
        format!("Thank you for shopping at {}!", self.store_name)
    }

    /// Whole-unit amount with the currency symbol: `₹155`.
    pub fn plain_amount(&self, amount: Money) -> String {
        format!("{}{}", self.currency_symbol, amount.to_plain_string())
    }

    /// Decimal amount with the currency symbol: `₹27.9`.
    pub fn decimal_amount(&self, amount: Money) -> String {
        format!("{}{}", self.currency_symbol, amount.to_decimal_string())
    }

    /// Formats one item line: name padded/truncated to 15 characters,
    /// quantity left-aligned in 3.
    ///
    /// ## Example
    /// ```rust
    /// use smartmart_core::money::Money;
    /// use smartmart_core::receipt::ReceiptLayout;
    /// use smartmart_core::types::{LineItem, ProductId};
    ///
    /// let layout = ReceiptLayout::default();
    /// let item = LineItem::new(ProductId::new("milk"), 2, Money::from_units(40));
    /// assert_eq!(layout.format_line_item(&item), "Milk            x 2   = ₹80");
    /// ```
    pub fn format_line_item(&self, item: &LineItem) -> String {
        format!(
            "{:<width$.width$} x {:<3} = {}",
            item.product_id.display_name(),
            item.quantity,
            self.plain_amount(item.line_cost),
            width = NAME_COLUMN_WIDTH
        )
    }

    /// Renders the full receipt text for a bill.
    pub fn render(&self, bill: &Bill) -> String {
        let mut lines = Vec::with_capacity(bill.items.len() + 14);

        lines.push(Self::heavy_rule());
        lines.push(self.title());
        lines.push(Self::heavy_rule());
        lines.push(format!("Date: {}", bill.timestamp.format(TIMESTAMP_FORMAT)));
        lines.push(Self::light_rule());
        lines.extend(bill.items.iter().map(|item| self.format_line_item(item)));
        lines.push(Self::light_rule());
        lines.push(format!("Subtotal: {}", self.plain_amount(bill.subtotal)));
        lines.push(format!(
            "Tax ({}): {}",
            bill.tax_rate,
            self.decimal_amount(bill.tax)
        ));
        lines.push(format!("Total: {}", self.decimal_amount(bill.total)));
        if let Some(method) = bill.payment_method {
            lines.push(format!("Payment Method: {}", method));
        }
        lines.push(Self::heavy_rule());
        lines.push(self.footer());
        lines.push(Self::heavy_rule());

        lines.join("\n")
    }
}

/// A paid bill together with its finalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub bill: Bill,
    pub text: String,
}

impl Receipt {
    /// Renders the bill with the given layout.
    pub fn new(bill: Bill, layout: &ReceiptLayout) -> Self {
        let text = layout.render(&bill);
        Receipt { bill, text }
    }
}
