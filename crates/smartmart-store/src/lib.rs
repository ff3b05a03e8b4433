//! # smartmart-store: Receipt Persistence for SmartMart
//!
//! Stores the receipt of each paid bill as a plain text file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  BillingEngine::pay(method, &mut sink)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  smartmart-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ReceiptFile ── implements ── smartmart_core::ReceiptSink      │   │
//! │  │   StoreConfig ── receipt path, create parent dirs               │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ./bill.txt (last receipt wins)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use smartmart_store::{ReceiptFile, StoreConfig};
//!
//! let store = ReceiptFile::new(StoreConfig::default());
//! let outcome = store.save("receipt text").unwrap();
//! if outcome.overwritten {
//!     eprintln!("replaced {}", outcome.path.display());
//! }
//! ```

pub mod error;
pub mod receipt_file;

pub use error::{StoreError, StoreResult};
pub use receipt_file::{ReceiptFile, SaveOutcome, StoreConfig, DEFAULT_RECEIPT_FILE};
