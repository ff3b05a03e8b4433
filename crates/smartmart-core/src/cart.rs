//! # Cart
//!
//! Per-session quantity accumulation with validation.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shell Action              Engine call              Cart Change         │
//! │  ────────────              ───────────              ───────────         │
//! │                                                                         │
//! │  Add Item to Cart ───────► add_item() ────────────► qty += n / push     │
//! │                                                                         │
//! │  View Cart ──────────────► snapshot() ────────────► (read only)         │
//! │                                                                         │
//! │  Bill paid ──────────────► clear() ───────────────► items.clear()       │
//! │                                                                         │
//! │  NOTE: a rejected add_item leaves the cart exactly as it was.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, ProductId};
use crate::validation::validate_quantity;

/// Largest subtotal a cart may reach, in paise. Half of `i64::MAX`, so
/// subtotal plus tax at any rate up to 100% still fits. Rates above 100% are
/// rejected by [`crate::types::TaxRate::try_from_bps`] and
/// [`crate::billing::BillingEngine::with_tax_rate`].
pub const MAX_SUBTOTAL_MINOR: i64 = i64::MAX / 2;

/// An item in the cart.
///
/// The unit price is captured from the catalog when the product is first
/// added. The catalog is immutable for the session, so this always matches
/// the catalog price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub unit_price: Money,
    pub quantity: i64,
}

impl CartItem {
    /// Calculates the line cost (unit price × quantity).
    pub fn line_cost(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    fn to_line_item(&self) -> LineItem {
        LineItem::new(self.product_id.clone(), self.quantity, self.unit_price)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product increases quantity)
/// - Every product is in the catalog (checked on insertion)
/// - Quantity is always > 0
/// - Items stay in first-insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a quantity of a product, accumulating onto any existing line.
    ///
    /// ## Behavior
    /// - Product name is matched case-insensitively
    /// - Unknown product → [`CoreError::UnknownProduct`]
    /// - Quantity ≤ 0 or overflowing the running total → [`CoreError::InvalidQuantity`]
    ///
    /// ## Returns
    /// The new accumulated quantity for the product.
    ///
    /// ## Example
    /// ```rust
    /// use smartmart_core::{Cart, Catalog};
    ///
    /// let catalog = Catalog::smartmart();
    /// let mut cart = Cart::new();
    /// assert_eq!(cart.add_item(&catalog, "Milk", 2).unwrap(), 2);
    /// assert_eq!(cart.add_item(&catalog, "milk", 1).unwrap(), 3);
    /// assert!(cart.add_item(&catalog, "mango", 1).is_err());
    /// ```
    pub fn add_item(&mut self, catalog: &Catalog, product: &str, quantity: i64) -> CoreResult<i64> {
        let product_id = ProductId::new(product);
        let entry = catalog
            .entry(&product_id)
            .ok_or_else(|| CoreError::UnknownProduct(product.trim().to_string()))?;
        validate_quantity(quantity)?;

        let too_large =
            || CoreError::invalid_quantity(quantity.to_string(), "total quantity is too large");

        if let Some(pos) = self.items.iter().position(|i| i.product_id == product_id) {
            let item = &self.items[pos];
            let new_qty = item.quantity.checked_add(quantity).ok_or_else(too_large)?;
            let cost = item
                .unit_price
                .checked_multiply_quantity(new_qty)
                .ok_or_else(too_large)?;
            self.checked_subtotal_with(&product_id, cost)
                .ok_or_else(too_large)?;
            self.items[pos].quantity = new_qty;
            debug!(product = %product_id, quantity = new_qty, "Cart quantity increased");
            return Ok(new_qty);
        }

        let cost = entry
            .unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(too_large)?;
        self.checked_subtotal_with(&product_id, cost)
            .ok_or_else(too_large)?;
        self.items.push(CartItem {
            product_id: entry.product_id.clone(),
            unit_price: entry.unit_price,
            quantity,
        });
        debug!(product = %product_id, quantity, "Cart item added");
        Ok(quantity)
    }

    /// Returns the accumulated quantity for a product (0 if absent).
    pub fn quantity_of(&self, product: &str) -> i64 {
        let product_id = ProductId::new(product);
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Priced line items in insertion order. Pure; the cart is not touched.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.iter().map(CartItem::to_line_item).collect()
    }

    /// Items currently in the cart.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Clears all items from the cart. Calling it on an empty cart is a no-op.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of distinct products in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Calculates the subtotal (before tax).
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_cost).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subtotal with `product_id`'s line replaced by `line_cost`, or `None`
    /// if it would exceed [`MAX_SUBTOTAL_MINOR`].
    fn checked_subtotal_with(&self, product_id: &ProductId, line_cost: Money) -> Option<Money> {
        self.items
            .iter()
            .filter(|i| &i.product_id != product_id)
            .try_fold(line_cost.minor(), |acc, i| acc.checked_add(i.line_cost().minor()))
            .filter(|&minor| minor <= MAX_SUBTOTAL_MINOR)
            .map(Money::from_minor)
    }
}

/// What "View Cart" shows: the lines and the untaxed subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub subtotal: Money,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart.snapshot(),
            subtotal: cart.subtotal(),
        }
    }
}
