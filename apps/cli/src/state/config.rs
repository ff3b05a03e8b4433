//! # Configuration State
//!
//! Application configuration resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--receipt-path`, `--keep-open`, `--verbose`)
//! 2. Environment variables (`SMARTMART_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use smartmart_core::{
    BillingEngine, Catalog, CoreResult, ReceiptLayout, TaxRate, CURRENCY_SYMBOL,
    DEFAULT_STORE_NAME, DEFAULT_TAX_RATE_BPS,
};
use smartmart_store::{StoreConfig, DEFAULT_RECEIPT_FILE};
use tracing::warn;

use crate::args::Args;

pub const ENV_RECEIPT_PATH: &str = "SMARTMART_RECEIPT_PATH";
pub const ENV_STORE_NAME: &str = "SMARTMART_STORE_NAME";
pub const ENV_KEEP_OPEN: &str = "SMARTMART_KEEP_OPEN";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Receipt file written after each paid bill.
    /// Default: "bill.txt" in the working directory
    pub receipt_path: PathBuf,

    /// Store name (receipt title and footer)
    pub store_name: String,

    /// Currency symbol printed before amounts
    pub currency_symbol: String,

    /// Tax rate in basis points
    /// e.g., 1800 = 18%, at most 10000
    pub tax_rate_bps: u32,

    /// Stay in the menu after a bill is paid
    pub keep_open: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            receipt_path: PathBuf::from(DEFAULT_RECEIPT_FILE),
            store_name: DEFAULT_STORE_NAME.to_string(),
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            keep_open: false,
        }
    }
}

impl AppConfig {
    /// Creates a configuration from the process environment and defaults.
    ///
    /// ## Environment Variables
    /// - `SMARTMART_RECEIPT_PATH`: Override the receipt file
    /// - `SMARTMART_STORE_NAME`: Override the store name
    /// - `SMARTMART_KEEP_OPEN`: `true`/`false` (also `1`/`0`, `yes`/`no`)
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup(ENV_RECEIPT_PATH).filter(|p| !p.trim().is_empty()) {
            config.receipt_path = PathBuf::from(path);
        }

        if let Some(name) = lookup(ENV_STORE_NAME) {
            let name = name.trim();
            if !name.is_empty() {
                config.store_name = name.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_KEEP_OPEN) {
            match parse_flag(&raw) {
                Some(keep_open) => config.keep_open = keep_open,
                None => warn!(value = %raw, "Ignoring unrecognized {}", ENV_KEEP_OPEN),
            }
        }

        config
    }

    /// Applies command-line flags on top.
    ///
    /// Boolean flags can only switch a setting on. `--verbose` only affects
    /// logging and is read before the configuration exists.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(path) = &args.receipt_path {
            self.receipt_path = path.clone();
        }
        self.keep_open |= args.keep_open;
        self
    }

    /// The configured tax rate; rates above 100% are rejected.
    pub fn tax_rate(&self) -> CoreResult<TaxRate> {
        TaxRate::try_from_bps(self.tax_rate_bps)
    }

    pub fn layout(&self) -> ReceiptLayout {
        ReceiptLayout {
            store_name: self.store_name.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }

    /// Receipt file settings. Missing parent directories of a custom
    /// `--receipt-path` are created on first save.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.receipt_path).create_parent_dirs(true)
    }

    /// Builds a billing engine for the standard catalog with this
    /// configuration's tax rate and receipt layout.
    ///
    /// ## Errors
    /// A validation error when `tax_rate_bps` is above 10000.
    pub fn billing_engine(&self) -> CoreResult<BillingEngine> {
        Ok(BillingEngine::new(Catalog::smartmart())
            .with_tax_rate(self.tax_rate()?)?
            .with_layout(self.layout()))
    }

    /// Formats a whole-unit amount with the configured symbol: `₹40`.
    pub fn format_price(&self, amount: smartmart_core::Money) -> String {
        format!("{}{}", self.currency_symbol, amount.to_plain_string())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartmart_core::Money;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(vars(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.receipt_path, PathBuf::from("bill.txt"));
        assert_eq!(config.store_name, "SmartMart");
        assert_eq!(config.tax_rate().unwrap(), TaxRate::from_bps(1800));
        assert!(!config.keep_open);
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::from_vars(vars(&[
            (ENV_RECEIPT_PATH, "/tmp/receipt.txt"),
            (ENV_STORE_NAME, "  Corner Shop "),
            (ENV_KEEP_OPEN, "YES"),
        ]));
        assert_eq!(config.receipt_path, PathBuf::from("/tmp/receipt.txt"));
        assert_eq!(config.store_name, "Corner Shop");
        assert!(config.keep_open);
        assert_eq!(config.layout().title(), " CORNER SHOP BILL");
    }

    #[test]
    fn test_unrecognized_keep_open_is_ignored() {
        let config = AppConfig::from_vars(vars(&[(ENV_KEEP_OPEN, "sometimes")]));
        assert!(!config.keep_open);
    }

    #[test]
    fn test_flags_win_over_environment() {
        let args = Args {
            receipt_path: Some(PathBuf::from("flag.txt")),
            keep_open: true,
            verbose: true,
        };
        let config = AppConfig::from_vars(vars(&[(ENV_RECEIPT_PATH, "env.txt")])).with_args(&args);
        assert_eq!(config.receipt_path, PathBuf::from("flag.txt"));
        assert!(config.keep_open);
        assert_eq!(config.store_config().receipt_path, PathBuf::from("flag.txt"));
    }

    #[test]
    fn test_store_config_creates_parent_dirs() {
        let args = Args {
            receipt_path: Some(PathBuf::from("receipts/today/bill.txt")),
            ..Args::default()
        };
        let store = AppConfig::default().with_args(&args).store_config();
        assert!(store.create_parent_dirs);
        assert_eq!(store.receipt_path, PathBuf::from("receipts/today/bill.txt"));
    }

    #[test]
    fn test_tax_rate_above_one_hundred_percent_is_rejected() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "receiptPath": "bill.txt",
            "storeName": "SmartMart",
            "currencySymbol": "₹",
            "taxRateBps": 30000,
            "keepOpen": false
        }))
        .unwrap();

        assert!(config.tax_rate().is_err());
        assert!(matches!(
            config.billing_engine(),
            Err(smartmart_core::CoreError::Validation(_))
        ));
        assert!(AppConfig::default().billing_engine().is_ok());
    }

    #[test]
    fn test_format_price() {
        let config = AppConfig::default();
        assert_eq!(config.format_price(Money::from_units(150)), "₹150");
        assert_eq!(config.format_price(Money::from_minor(8050)), "₹80.50");
    }
}
