//! # Bill
//!
//! The computed totals for a cart at the moment billing starts.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItem.line_cost = quantity × unit_price                             │
//! │  subtotal           = Σ line_cost                                       │
//! │  tax                = round_half_up(subtotal × 18%, 2 decimals)         │
//! │  total              = subtotal + tax        (never rounded again)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{LineItem, PaymentMethod, TaxRate};

/// An ephemeral bill built from a cart snapshot.
///
/// The engine holds it only while confirmation and payment are pending; once
/// paid it is rendered into a [`crate::receipt::Receipt`] and handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Correlates log lines for one billing cycle. Not printed.
    pub id: Uuid,
    /// Local wall-clock time the bill was generated.
    pub timestamp: NaiveDateTime,
    /// Lines in cart insertion order.
    pub items: Vec<LineItem>,
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
    /// Set only once payment is taken.
    pub payment_method: Option<PaymentMethod>,
}

impl Bill {
    /// Computes subtotal, tax and total for the given lines.
    ///
    /// ## Errors
    /// [`ValidationError::OutOfRange`] for the `bill_total` field when the
    /// subtotal, tax or total does not fit in an `i64` of paise.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use smartmart_core::bill::Bill;
    /// use smartmart_core::money::Money;
    /// use smartmart_core::types::{LineItem, ProductId, TaxRate};
    ///
    /// let items = vec![
    ///     LineItem::new(ProductId::new("milk"), 2, Money::from_units(40)),
    ///     LineItem::new(ProductId::new("bread"), 3, Money::from_units(25)),
    /// ];
    /// let at = NaiveDate::from_ymd_opt(2024, 3, 1)
    ///     .unwrap()
    ///     .and_hms_opt(9, 30, 0)
    ///     .unwrap();
    ///
    /// let bill = Bill::compute(items, TaxRate::from_bps(1800), at).unwrap();
    /// assert_eq!(bill.subtotal, Money::from_units(155));
    /// assert_eq!(bill.tax, Money::from_minor(2790));
    /// assert_eq!(bill.total, Money::from_minor(18290));
    /// ```
    pub fn compute(
        items: Vec<LineItem>,
        tax_rate: TaxRate,
        timestamp: NaiveDateTime,
    ) -> CoreResult<Self> {
        let out_of_range = || ValidationError::OutOfRange {
            field: "bill_total".to_string(),
            min: 0,
            max: i64::MAX,
        };

        let subtotal = items
            .iter()
            .try_fold(0i64, |acc, i| acc.checked_add(i.line_cost.minor()))
            .map(Money::from_minor)
            .ok_or_else(out_of_range)?;
        let tax = subtotal.calculate_tax(tax_rate).ok_or_else(out_of_range)?;
        let total = subtotal
            .minor()
            .checked_add(tax.minor())
            .map(Money::from_minor)
            .ok_or_else(out_of_range)?;

        Ok(Bill {
            id: Uuid::new_v4(),
            timestamp,
            items,
            subtotal,
            tax_rate,
            tax,
            total,
            payment_method: None,
        })
    }

    /// Number of lines on the bill.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }
}
