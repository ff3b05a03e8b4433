//! # smartmart-core: Pure Billing Logic for SmartMart
//!
//! This crate is the **heart** of SmartMart billing. It contains the cart,
//! totals, receipt formatting and the billing state machine, with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SmartMart Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    smartmart-cli (terminal shell)               │   │
//! │  │    Menu ──► Command ──► dispatch table ──► prompts              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ smartmart-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │  billing  │  │  receipt  │  │   │
//! │  │   │  Catalog  │  │   Cart    │  │  Engine   │  │  Layout   │  │   │
//! │  │   │  lookup   │  │ CartView  │  │  states   │  │  Receipt  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO TERMINAL • NO NETWORK                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ReceiptSink                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 smartmart-store (bill.txt writer)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, PaymentMethod, LineItem, states)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Fixed product price list
//! - [`cart`] - Quantity accumulation
//! - [`bill`] - Subtotal/tax/total computation
//! - [`receipt`] - Receipt text layout
//! - [`billing`] - The billing engine and its state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use smartmart_core::{BillingEngine, Catalog};
//!
//! let mut engine = BillingEngine::new(Catalog::smartmart());
//! engine.add_item("milk", 2).unwrap();
//! engine.add_item("Bread", 3).unwrap();
//!
//! let bill = engine.generate_bill().unwrap();
//! assert_eq!(bill.subtotal.to_plain_string(), "155");
//! assert_eq!(bill.tax.to_decimal_string(), "27.9");
//! assert_eq!(bill.total.to_decimal_string(), "182.9");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod billing;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::Bill;
pub use billing::{BillingEngine, PaidBill, PersistReport, ReceiptSink};
pub use cart::{Cart, CartItem, CartView};
pub use catalog::{Catalog, CatalogEntry};
pub use error::{CoreError, CoreResult, SinkError, ValidationError};
pub use money::Money;
pub use receipt::{Receipt, ReceiptLayout};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat tax applied to every bill: 18% in basis points.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// The one currency symbol the store prints.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Store name used on receipts unless configured otherwise.
pub const DEFAULT_STORE_NAME: &str = "SmartMart";

/// Width of the `=`/`-` rules framing a receipt.
pub const RECEIPT_WIDTH: usize = 35;

/// Product name column width on item lines.
pub const NAME_COLUMN_WIDTH: usize = 15;
