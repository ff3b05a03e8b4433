//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    round(2.675, 2) = 2.67  ❌ (2.675 is stored as 2.67499999...)        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    Every amount is an i64 count of paise (1/100 rupee).                 │
//! │    ₹155 × 18% = 15500 × 1800 / 10000 = 2790 paise = ₹27.90              │
//! │    Rounding happens exactly once, on integers, half-up.                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use smartmart_core::money::Money;
//!
//! // Catalog prices are whole rupees
//! let price = Money::from_units(40);
//! assert_eq!(price.minor(), 4000);
//!
//! // Arithmetic operations
//! let line = price * 2;
//! assert_eq!(line.to_plain_string(), "80");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::types::TaxRate;
use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never has to special-case subtraction
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support, serialized as the raw minor-unit count
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Catalog price ──► CartItem.unit_price ──► LineItem.line_cost          │
/// │                                                │                        │
/// │                                                ▼                        │
/// │                         Bill.subtotal ──► Bill.tax ──► Bill.total       │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Number of minor units (paise) in one major unit (rupee).
    pub const MINOR_PER_UNIT: i64 = 100;

    /// Creates a Money value from minor units (paise).
    ///
    /// ## Example
    /// ```rust
    /// use smartmart_core::money::Money;
    ///
    /// let tax = Money::from_minor(2790); // ₹27.90
    /// assert_eq!(tax.units(), 27);
    /// assert_eq!(tax.minor_part(), 90);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Catalog prices are always whole units, so this is the constructor the
    /// catalog uses.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * Self::MINOR_PER_UNIT)
    }

    /// Like [`Money::from_units`], but `None` when the price does not fit
    /// in paise.
    ///
    /// ## Example
    /// ```rust
    /// use smartmart_core::money::Money;
    ///
    /// assert_eq!(Money::checked_from_units(40), Some(Money::from_minor(4000)));
    /// assert_eq!(Money::checked_from_units(i64::MAX / 10), None);
    /// ```
    #[inline]
    pub const fn checked_from_units(units: i64) -> Option<Self> {
        match units.checked_mul(Self::MINOR_PER_UNIT) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / Self::MINOR_PER_UNIT
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % Self::MINOR_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax rounded half-up to the nearest minor unit.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP on integer minor units                               │
    /// │                                                                     │
    /// │  tax_minor = (amount_minor × bps + 5000) / 10000                    │
    /// │                                                                     │
    /// │  The +5000 is half of the 10000 bps divisor, so an exact half      │
    /// │  (e.g. 265.5 paise) always rounds up (266 paise).                   │
    /// │  Billing amounts are never negative, so "up" is "away from zero".   │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use smartmart_core::money::Money;
    /// use smartmart_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_units(155);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1800)).unwrap();
    /// assert_eq!(tax.minor(), 2790); // ₹27.90
    ///
    /// // Out of i64 range at a 300% rate
    /// let huge = Money::from_minor(i64::MAX / 2);
    /// assert!(huge.calculate_tax(TaxRate::from_bps(30000)).is_none());
    /// ```
    ///
    /// ## Returns
    /// `None` when the tax does not fit in an `i64` of minor units.
    pub fn calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        // i128 keeps large amounts from overflowing before the division
        let tax_minor = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        i64::try_from(tax_minor).ok().map(Money::from_minor)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use smartmart_core::money::Money;
    ///
    /// let unit_price = Money::from_units(25);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_units(75));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Formats the amount the way whole-rupee values appear on a receipt.
    ///
    /// Whole amounts print without decimals (`155`); anything with paise
    /// prints both fractional digits (`80.50`).
    pub fn to_plain_string(&self) -> String {
        if self.minor_part() == 0 {
            format!("{}{}", self.sign(), self.units().abs())
        } else {
            format!("{}{}.{:02}", self.sign(), self.units().abs(), self.minor_part())
        }
    }

    /// Formats the amount as a decimal number with trailing zeros trimmed,
    /// keeping at least one fractional digit.
    ///
    /// This is how tax and totals appear on a receipt.
    ///
    /// ## Example
    /// ```rust
    /// use smartmart_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(2790).to_decimal_string(), "27.9");
    /// assert_eq!(Money::from_minor(1800).to_decimal_string(), "18.0");
    /// assert_eq!(Money::from_minor(2745).to_decimal_string(), "27.45");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let part = self.minor_part();
        let fraction = if part % 10 == 0 {
            format!("{}", part / 10)
        } else {
            format!("{:02}", part)
        };
        format!("{}{}.{}", self.sign(), self.units().abs(), fraction)
    }

    fn sign(&self) -> &'static str {
        if self.0 < 0 {
            "-"
        } else {
            ""
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the full amount with the currency symbol (`₹27.90`).
///
/// ## Note
/// This is for logs and debugging. Receipts use `to_plain_string` and
/// `to_decimal_string` to keep their historical layout.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}.{:02}",
            self.sign(),
            CURRENCY_SYMBOL,
            self.units().abs(),
            self.minor_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(40);
        assert_eq!(money.minor(), 4000);
        assert_eq!(money.units(), 40);
        assert_eq!(money.minor_part(), 0);
    }

    #[test]
    fn test_checked_from_units() {
        assert_eq!(Money::checked_from_units(150), Some(Money::from_units(150)));
        assert_eq!(
            Money::checked_from_units(i64::MAX / 100),
            Some(Money::from_minor(i64::MAX / 100 * 100))
        );
        assert_eq!(Money::checked_from_units(i64::MAX / 100 + 1), None);
        assert_eq!(Money::checked_from_units(i64::MAX / 10), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_minor(2790)), "₹27.90");
        assert_eq!(format!("{}", Money::from_units(5)), "₹5.00");
        assert_eq!(format!("{}", Money::from_minor(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_units(155).to_plain_string(), "155");
        assert_eq!(Money::zero().to_plain_string(), "0");
        assert_eq!(Money::from_minor(8050).to_plain_string(), "80.50");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_minor(18290).to_decimal_string(), "182.9");
        assert_eq!(Money::from_minor(2790).to_decimal_string(), "27.9");
        assert_eq!(Money::from_units(18).to_decimal_string(), "18.0");
        assert_eq!(Money::from_minor(2745).to_decimal_string(), "27.45");
        assert_eq!(Money::from_minor(105).to_decimal_string(), "1.05");
        assert_eq!(Money::zero().to_decimal_string(), "0.0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(10);
        let b = Money::from_units(5);

        assert_eq!((a + b).units(), 15);
        assert_eq!((a - b).units(), 5);
        assert_eq!((a * 3).units(), 30);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_units(20));
    }

    #[test]
    fn test_tax_eighteen_percent() {
        // ₹155 at 18% = ₹27.90
        let tax = Money::from_units(155).calculate_tax(TaxRate::from_bps(1800)).unwrap();
        assert_eq!(tax.minor(), 2790);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // ₹14.75 at 18% = 265.5 paise → 266
        let tax = Money::from_minor(1475).calculate_tax(TaxRate::from_bps(1800)).unwrap();
        assert_eq!(tax.minor(), 266);

        // 1474 paise at 18% = 265.32 paise → 265
        let tax = Money::from_minor(1474).calculate_tax(TaxRate::from_bps(1800)).unwrap();
        assert_eq!(tax.minor(), 265);
    }

    /// round(2.675, 2) misbehaves in binary floats; integer math does not.
    #[test]
    fn test_tax_has_no_float_artifacts() {
        // ₹26.75 at 10% = 267.5 paise → 268
        let tax = Money::from_minor(2675).calculate_tax(TaxRate::from_bps(1000)).unwrap();
        assert_eq!(tax.minor(), 268);
    }

    #[test]
    fn test_tax_out_of_range_is_none() {
        let huge = Money::from_minor(4_000_000_000_000_000_000);

        assert_eq!(huge.calculate_tax(TaxRate::from_bps(10000)), Some(huge));
        // 1.2e19 paise would wrap to a negative i64
        assert_eq!(huge.calculate_tax(TaxRate::from_bps(30000)), None);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_units(6);
        assert_eq!(unit_price.multiply_quantity(12), Money::from_units(72));
        assert_eq!(unit_price.checked_multiply_quantity(i64::MAX), None);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_minor(-1).is_negative());
    }
}
