//! # Error Types
//!
//! Domain-specific error types for smartmart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  smartmart-core errors (this file)                                     │
//! │  ├── CoreError        - Billing rule violations (all recoverable)      │
//! │  └── ValidationError  - Catalog construction failures                  │
//! │                                                                         │
//! │  smartmart-store errors (separate crate)                               │
//! │  └── StoreError       - Receipt file write failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the terminal user sees (code + message)   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product, quantity, state)
//! 3. Errors are enum variants, never String
//! 4. A failed operation never leaves the cart half-modified

use thiserror::Error;

use crate::receipt::Receipt;
use crate::types::BillingState;

/// Error type a `ReceiptSink` reports when it cannot store a receipt.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Core Error
// =============================================================================

/// Core billing errors.
///
/// Every variant is recoverable: the session keeps running and the cart is
/// exactly as it was before the failed call.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product is not in the catalog.
    ///
    /// ## When This Occurs
    /// - Typo in the product name ("mango" when the store has none)
    /// - Catalog lookup for a display or price query
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// Quantity is not a positive whole number.
    ///
    /// ## User Workflow
    /// ```text
    /// Enter quantity: 2.5
    ///      │
    ///      ▼
    /// parse_quantity("2.5")
    ///      │
    ///      ▼
    /// InvalidQuantity { value: "2.5", reason: "must be a whole number" }
    ///      │
    ///      ▼
    /// Terminal shows the message, cart unchanged
    /// ```
    #[error("Invalid quantity '{value}': {reason}")]
    InvalidQuantity { value: String, reason: String },

    /// Billing was attempted with nothing in the cart.
    #[error("Cannot generate bill: cart is empty")]
    EmptyCart,

    /// Payment selection is not one of the accepted methods.
    #[error("Invalid payment method '{0}': choose Cash, Credit Card, UPI or Debit Card")]
    InvalidPaymentMethod(String),

    /// The billing engine is not in a state that allows the operation.
    ///
    /// ## When This Occurs
    /// - `confirm` or `abort` without a bill awaiting confirmation
    /// - `select_payment` before the bill was confirmed
    /// - Adding items or generating a new bill while one is pending
    #[error("Cannot {operation} while billing is {state}")]
    InvalidBillingState {
        operation: &'static str,
        state: BillingState,
    },

    /// The receipt sink failed to store a paid receipt.
    ///
    /// The finalized receipt travels with the error so it is never lost; the
    /// cart has not been cleared and payment can be retried.
    #[error("Failed to persist receipt: {source}")]
    ReceiptPersistence {
        receipt: Box<Receipt>,
        #[source]
        source: SinkError,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidQuantity error.
    pub fn invalid_quantity(value: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidQuantity {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building a catalog from configured entries.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., the same product listed twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
