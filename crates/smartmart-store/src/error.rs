//! # Store Error Types
//!
//! Error types for receipt persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the path that failed                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError::ReceiptPersistence ← Carries the unsaved receipt           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError ← Printed to the terminal, cart kept                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Receipt persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The receipt file could not be written.
    ///
    /// ## When This Occurs
    /// - Permission denied on the file or its directory
    /// - Disk full
    /// - Read-only file system
    #[error("Could not write receipt to '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The parent directory could not be created.
    #[error("Could not create directory '{}': {source}", path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configured receipt path is a directory.
    #[error("Receipt path '{}' is a directory", path.display())]
    NotAFile { path: PathBuf },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
