//! # CLI Error Type
//!
//! Unified error type for menu handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Terminal Shell                     │
//! │                                                                         │
//! │  Menu handler  ── CliResult<SessionSignal>                              │
//! │         │                                                               │
//! │         ├── CoreError  (unknown product, bad quantity, empty cart ...)  │
//! │         │       └──► CliError { code, message } ──► printed, loop goes on│
//! │         │                                                               │
//! │         ├── ReceiptPersistence (StoreError boxed in SinkError)          │
//! │         │       └──► CliError { STORAGE_ERROR } ──► printed, cart kept  │
//! │         │                                                               │
//! │         └── Prompt I/O failure (stdin closed, no terminal)              │
//! │                 └──► CliError { INTERNAL } ──► session ends             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use smartmart_core::CoreError;

/// Error returned from menu handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message printed to the terminal
    pub message: String,
}

/// Error codes for handler failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product not in the catalog
    NotFound,

    /// Input validation failed (quantity, catalog entries)
    ValidationError,

    /// Operation not allowed right now (empty cart, bill pending)
    BusinessLogic,

    /// Payment selection rejected
    PaymentError,

    /// Receipt could not be written
    StorageError,

    /// Terminal I/O failed; the session cannot continue
    Internal,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    /// Only terminal failures end the session; everything else is shown to
    /// the user and the menu comes back.
    pub fn is_fatal(&self) -> bool {
        self.code == ErrorCode::Internal
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownProduct(name) => CliError::new(
                ErrorCode::NotFound,
                format!("Item '{}' not found! Try again.", name),
            ),
            e @ CoreError::InvalidQuantity { .. } => CliError::validation(e.to_string()),
            e @ CoreError::EmptyCart => CliError::new(ErrorCode::BusinessLogic, e.to_string()),
            e @ CoreError::InvalidPaymentMethod(_) => {
                CliError::new(ErrorCode::PaymentError, e.to_string())
            }
            e @ CoreError::InvalidBillingState { .. } => {
                CliError::new(ErrorCode::BusinessLogic, e.to_string())
            }
            CoreError::ReceiptPersistence { receipt, source } => {
                tracing::error!(bill_id = %receipt.bill.id, "Receipt not saved: {}", source);
                CliError::new(
                    ErrorCode::StorageError,
                    format!(
                        "Receipt could not be saved: {}. Your cart was kept; choose Generate Bill to retry.",
                        source
                    ),
                )
            }
            CoreError::Validation(e) => CliError::validation(e.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::internal(format!("Terminal I/O failed: {}", err))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::internal(format!("Prompt failed: {}", err))
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI handlers.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use smartmart_core::{BillingState, ValidationError};

    #[test]
    fn test_core_error_codes() {
        let cases = [
            (CoreError::UnknownProduct("mango".into()), ErrorCode::NotFound),
            (
                CoreError::invalid_quantity("-1", "quantity must be positive"),
                ErrorCode::ValidationError,
            ),
            (CoreError::EmptyCart, ErrorCode::BusinessLogic),
            (
                CoreError::InvalidPaymentMethod("cheque".into()),
                ErrorCode::PaymentError,
            ),
            (
                CoreError::InvalidBillingState {
                    operation: "confirm",
                    state: BillingState::Ready,
                },
                ErrorCode::BusinessLogic,
            ),
            (
                CoreError::Validation(ValidationError::Required {
                    field: "product name".into(),
                }),
                ErrorCode::ValidationError,
            ),
        ];

        for (err, code) in cases {
            let cli = CliError::from(err);
            assert_eq!(cli.code, code);
            assert!(!cli.is_fatal());
        }
    }

    #[test]
    fn test_unknown_product_message() {
        let cli = CliError::from(CoreError::UnknownProduct("mango".into()));
        assert_eq!(cli.message, "Item 'mango' not found! Try again.");
    }

    #[test]
    fn test_io_error_is_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed");
        let cli = CliError::from(io);
        assert_eq!(cli.code, ErrorCode::Internal);
        assert!(cli.is_fatal());
    }

    #[test]
    fn test_serialized_code() {
        let cli = CliError::new(ErrorCode::StorageError, "disk full");
        let json = serde_json::to_string(&cli).unwrap();
        assert_eq!(json, r#"{"code":"STORAGE_ERROR","message":"disk full"}"#);
    }
}
