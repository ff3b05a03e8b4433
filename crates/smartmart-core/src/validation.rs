//! # Validation Module
//!
//! Input validation for quantities, catalog entries and tax rates.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal shell                                               │
//! │  └── Raw text from prompts ("2", "2.5", "abc")                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── parse_quantity: text → positive whole number                      │
//! │  └── catalog entry checks (name, price)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart / BillingEngine                                         │
//! │  └── Catalog membership, accumulation overflow, state rules            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use smartmart_core::validation::{parse_quantity, validate_quantity};
//!
//! assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
//! assert!(parse_quantity("2.5").is_err());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Add Item to Cart                                                       │
/// │                                                                         │
/// │  User enters quantity: 0                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(0) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "Quantity must be positive"               │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_item                                   │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(CoreError::invalid_quantity(
            qty.to_string(),
            "quantity must be positive",
        ));
    }

    Ok(())
}

/// Parses a quantity typed by the user.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must be a whole number ("2.5" and "abc" are rejected)
/// - Must be positive
pub fn parse_quantity(input: &str) -> CoreResult<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(CoreError::invalid_quantity(input, "quantity is required"));
    }

    let qty = input
        .parse::<i64>()
        .map_err(|_| CoreError::invalid_quantity(input, "please enter a whole number"))?;

    validate_quantity(qty)?;
    Ok(qty)
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a product name for the catalog.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 50 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }

    if name.chars().count() > 50 {
        return Err(ValidationError::OutOfRange {
            field: "product name length".to_string(),
            min: 1,
            max: 50,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (free items are allowed)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("2").unwrap(), 2);
        assert_eq!(parse_quantity("  12\n").unwrap(), 12);

        for bad in ["", "   ", "abc", "2.5", "0", "-3", "1e3"] {
            let err = parse_quantity(bad).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidQuantity { .. }),
                "expected InvalidQuantity for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("milk").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_units(40)).is_ok());
        assert!(validate_unit_price(Money::from_units(-1)).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(1800).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
