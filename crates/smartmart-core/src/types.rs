//! # Domain Types
//!
//! Core domain types used throughout SmartMart billing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductId     │   │    LineItem     │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  "milk"         │   │  product_id     │   │  Cash           │       │
//! │  │  (lowercase)    │   │  quantity       │   │  CreditCard     │       │
//! │  │                 │   │  unit_price     │   │  Upi            │       │
//! │  │                 │   │  line_cost      │   │  DebitCard      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  BillingState   │   │ SessionSignal   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Empty, Ready   │   │  Continue       │       │
//! │  │  1800 = 18%     │   │  Pending*, Paid │   │  Terminate      │       │
//! │  │                 │   │  Cancelled      │   │  Cancelled      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_tax_rate_bps;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (the store's flat GST rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from basis points, rejecting anything above 100%.
    ///
    /// ## Example
    /// ```rust
    /// use smartmart_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::try_from_bps(1800).unwrap().bps(), 1800);
    /// assert!(TaxRate::try_from_bps(30000).is_err());
    /// ```
    pub fn try_from_bps(bps: u32) -> CoreResult<Self> {
        validate_tax_rate_bps(bps)?;
        Ok(TaxRate(bps))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

/// Shows the rate as a percentage label: `18%`, `8.25%`, `12.5%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let part = self.0 % 100;
        if part == 0 {
            write!(f, "{}%", whole)
        } else if part % 10 == 0 {
            write!(f, "{}.{}%", whole, part / 10)
        } else {
            write!(f, "{}.{:02}%", whole, part)
        }
    }
}

// =============================================================================
// Product Identifier
// =============================================================================

/// Case-insensitive product identifier.
///
/// The stored form is always trimmed lowercase, so `"Milk"`, `" MILK "` and
/// `"milk"` are the same product.
///
/// ## Example
/// ```rust
/// use smartmart_core::types::ProductId;
///
/// let id = ProductId::new(" Olive OIL ");
/// assert_eq!(id.as_str(), "olive oil");
/// assert_eq!(id.display_name(), "Olive Oil");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Normalizes raw input into the canonical identifier.
    pub fn new(raw: &str) -> Self {
        ProductId(raw.trim().to_lowercase())
    }

    /// Returns the canonical (lowercase) form.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if the identifier is empty after normalization.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the name as shown to customers: first letter of every word
    /// capitalized.
    pub fn display_name(&self) -> String {
        let mut name = String::with_capacity(self.0.len());
        let mut at_word_start = true;
        for c in self.0.chars() {
            if at_word_start {
                name.extend(c.to_uppercase());
            } else {
                name.push(c);
            }
            at_word_start = !c.is_alphabetic();
        }
        name
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(raw: &str) -> Self {
        ProductId::new(raw)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid. A label only; no payment is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Credit card on an external terminal.
    CreditCard,
    /// Unified Payments Interface transfer.
    Upi,
    /// Debit card on an external terminal.
    DebitCard,
}

impl PaymentMethod {
    /// All accepted methods, in the order they are offered to the user.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::Upi,
        PaymentMethod::DebitCard,
    ];

    /// Label printed on the receipt.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::DebitCard => "Debit Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a payment selection, ignoring case, spaces, hyphens and
/// underscores (`"credit card"`, `"Credit-Card"`, `"UPI"`).
impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "creditcard" => Ok(PaymentMethod::CreditCard),
            "upi" => Ok(PaymentMethod::Upi),
            "debitcard" => Ok(PaymentMethod::DebitCard),
            _ => Err(CoreError::InvalidPaymentMethod(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced, quantified entry of a cart snapshot or bill.
///
/// Derived on demand from the cart; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
    /// `quantity × unit_price`.
    pub line_cost: Money,
}

impl LineItem {
    /// Builds a line item, computing its cost.
    pub fn new(product_id: ProductId, quantity: i64, unit_price: Money) -> Self {
        LineItem {
            line_cost: unit_price.multiply_quantity(quantity),
            product_id,
            quantity,
            unit_price,
        }
    }
}

// =============================================================================
// Billing State
// =============================================================================

/// Where the billing engine is in the generate → confirm → pay cycle.
///
/// ```text
///            add_item                generate_bill
///   Empty ─────────────► Ready ─────────────────────► PendingConfirm
///     ▲                   ▲  ▲                          │        │
///     │                   │  └──── abort (Cancelled) ───┘        │ confirm
///     │                   │                                      ▼
///     └──── Paid ◄────────┴──────── select_payment ──── PendingPayment
///          (cart cleared)
/// ```
///
/// `Paid` and `Cancelled` are passed through within a single call; the
/// engine then reports `Empty` or `Ready` from the cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingState {
    /// Cart has no items.
    Empty,
    /// Cart has items; a bill may be generated.
    Ready,
    /// A bill was computed and is awaiting proceed/abort.
    PendingConfirm,
    /// The bill was confirmed and is awaiting a payment method.
    PendingPayment,
    /// Payment was taken, receipt persisted, cart cleared.
    Paid,
    /// The user aborted at confirmation; the cart is kept.
    Cancelled,
}

impl fmt::Display for BillingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillingState::Empty => "empty",
            BillingState::Ready => "ready",
            BillingState::PendingConfirm => "awaiting confirmation",
            BillingState::PendingPayment => "awaiting payment",
            BillingState::Paid => "paid",
            BillingState::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Session Signal
// =============================================================================

/// What the command dispatcher should do after handling a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionSignal {
    /// Keep reading commands.
    Continue,
    /// The session may end (bill paid, or the user chose exit).
    Terminate,
    /// Billing was aborted; the cart is intact and the session continues.
    Cancelled,
}

// =============================================================================
// Unit Tests
// =============================================================================
