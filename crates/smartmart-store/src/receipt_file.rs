//! # Receipt File
//!
//! Writes the finalized receipt text verbatim (UTF-8, so `₹` survives) to a
//! single file. Each paid bill replaces the previous one.
//!
//! ## Write Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BillingEngine::pay()                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReceiptFile::persist() ← ReceiptSink impl                              │
//! │       │                                                                 │
//! │       ├── path is a directory? → StoreError::NotAFile                   │
//! │       ├── file exists?         → warn!, overwritten = true              │
//! │       ├── create parent dirs (if enabled)                               │
//! │       └── fs::write(path, text)                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use smartmart_core::{PersistReport, Receipt, ReceiptSink, SinkError};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Default receipt file name, relative to the working directory.
pub const DEFAULT_RECEIPT_FILE: &str = "bill.txt";

// =============================================================================
// Configuration
// =============================================================================

/// Receipt store configuration.
///
/// ## Example
/// ```rust
/// use smartmart_store::StoreConfig;
///
/// let config = StoreConfig::new("out/bill.txt").create_parent_dirs(true);
/// assert!(config.create_parent_dirs);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Where the receipt is written.
    pub receipt_path: PathBuf,

    /// Create missing parent directories before writing.
    /// Default: false
    pub create_parent_dirs: bool,
}

impl StoreConfig {
    /// Creates a configuration for the given receipt path.
    pub fn new(receipt_path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            receipt_path: receipt_path.into(),
            create_parent_dirs: false,
        }
    }

    /// Sets whether missing parent directories are created.
    pub fn create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_RECEIPT_FILE)
    }
}

// =============================================================================
// Receipt File
// =============================================================================

/// What happened on a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub path: PathBuf,
    /// A previous receipt was replaced.
    pub overwritten: bool,
}

/// File-backed receipt store.
#[derive(Debug, Clone)]
pub struct ReceiptFile {
    config: StoreConfig,
}

impl ReceiptFile {
    pub fn new(config: StoreConfig) -> Self {
        ReceiptFile { config }
    }

    /// Path the receipt is written to.
    pub fn path(&self) -> &Path {
        &self.config.receipt_path
    }

    /// Writes `text` to the receipt file, replacing any existing content.
    ///
    /// An existing file is reported through `SaveOutcome::overwritten` and
    /// logged as a warning; it is not an error.
    pub fn save(&self, text: &str) -> StoreResult<SaveOutcome> {
        let path = &self.config.receipt_path;

        if path.is_dir() {
            return Err(StoreError::NotAFile { path: path.clone() });
        }

        let overwritten = path.exists();
        if overwritten {
            warn!(path = %path.display(), "Receipt file already exists, overwriting");
        }

        if self.config.create_parent_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| StoreError::CreateDirFailed {
                    path: parent.to_path_buf(),
                    source,
                })?;
                debug!(dir = %parent.display(), "Receipt directory ready");
            }
        }

        fs::write(path, text).map_err(|source| StoreError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), bytes = text.len(), overwritten, "Receipt saved");
        Ok(SaveOutcome {
            path: path.clone(),
            overwritten,
        })
    }
}

impl ReceiptSink for ReceiptFile {
    fn persist(&mut self, receipt: &Receipt) -> Result<PersistReport, SinkError> {
        let outcome = self.save(&receipt.text)?;
        Ok(PersistReport {
            location: outcome.path.display().to_string(),
            overwritten: outcome.overwritten,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
