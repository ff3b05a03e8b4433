//! # Catalog
//!
//! The fixed, read-only price list for a session.
//!
//! Entries keep their declaration order so listings are stable; lookups are
//! case-insensitive because every key is a normalized [`ProductId`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::ProductId;
use crate::validation::{validate_product_name, validate_unit_price};

/// The SmartMart store's products and their prices in whole rupees.
const SMARTMART_PRODUCTS: &[(&str, i64)] = &[
    ("milk", 40),
    ("bread", 25),
    ("eggs", 6),
    ("rice", 70),
    ("sugar", 45),
    ("oil", 150),
    ("soap", 30),
    ("salt", 20),
    ("chips", 10),
    ("juice", 35),
];

/// One product on sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub product_id: ProductId,
    pub unit_price: Money,
}

impl CatalogEntry {
    /// Customer-facing product name ("Milk").
    pub fn display_name(&self) -> String {
        self.product_id.display_name()
    }
}

/// Immutable product → price mapping.
///
/// ## Example
/// ```rust
/// use smartmart_core::catalog::Catalog;
/// use smartmart_core::money::Money;
///
/// let catalog = Catalog::smartmart();
/// assert_eq!(catalog.lookup("MILK").unwrap(), Money::from_units(40));
/// assert!(catalog.lookup("mango").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog from `(name, whole-unit price)` pairs.
    ///
    /// ## Errors
    /// - empty or overlong product names
    /// - negative prices, or prices too large to hold in paise
    /// - the same product listed twice (compared case-insensitively)
    pub fn from_entries<'a, I>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let mut catalog = Catalog {
            entries: Vec::new(),
        };

        for (name, units) in entries {
            validate_product_name(name)?;
            let unit_price =
                Money::checked_from_units(units).ok_or_else(|| ValidationError::OutOfRange {
                    field: "price".to_string(),
                    min: 0,
                    max: i64::MAX / Money::MINOR_PER_UNIT,
                })?;
            validate_unit_price(unit_price)?;

            let product_id = ProductId::new(name);
            if catalog.contains(&product_id) {
                return Err(ValidationError::Duplicate {
                    field: "product".to_string(),
                    value: product_id.to_string(),
                }
                .into());
            }

            catalog.entries.push(CatalogEntry {
                product_id,
                unit_price,
            });
        }

        debug!(products = catalog.entries.len(), "Catalog built");
        Ok(catalog)
    }

    /// The SmartMart store catalog.
    pub fn smartmart() -> Self {
        Catalog {
            entries: SMARTMART_PRODUCTS
                .iter()
                .map(|&(name, units)| CatalogEntry {
                    product_id: ProductId::new(name),
                    unit_price: Money::from_units(units),
                })
                .collect(),
        }
    }

    /// Returns the unit price for a product, ignoring case.
    ///
    /// Fails with [`CoreError::UnknownProduct`] when the product is not
    /// sold here.
    pub fn lookup(&self, product: &str) -> CoreResult<Money> {
        self.entry(&ProductId::new(product))
            .map(|entry| entry.unit_price)
            .ok_or_else(|| CoreError::UnknownProduct(product.trim().to_string()))
    }

    /// Returns the entry for an already-normalized identifier.
    pub fn entry(&self, product_id: &ProductId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| &e.product_id == product_id)
    }

    /// Checks whether the product is sold here.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entry(product_id).is_some()
    }

    /// All entries in declaration order.
    pub fn list(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::smartmart()
    }
}
