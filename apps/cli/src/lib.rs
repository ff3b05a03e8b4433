//! # SmartMart CLI Library
//!
//! The interactive billing terminal.
//!
//! ## Module Structure
//! ```text
//! smartmart_cli/
//! ├── lib.rs          ← You are here (run + logging setup)
//! ├── args.rs         ← Command-line flags (clap)
//! ├── commands/       ← Menu loop and handlers
//! │   ├── mod.rs      ← Command enum, Session, dispatch
//! │   ├── cart.rs     ← Show Products, Add Item, View Cart
//! │   └── bill.rs     ← Generate Bill
//! ├── display.rs      ← Menu, product and cart listings
//! ├── error.rs        ← CliError / ErrorCode
//! ├── prompt.rs       ← Prompter trait + dialoguer implementation
//! └── state/
//!     └── config.rs   ← AppConfig (flags, environment, defaults)
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize tracing (stderr)                                         │
//! │  2. Resolve AppConfig (flags > SMARTMART_* env > defaults)              │
//! │  3. Build BillingEngine (standard catalog, tax, receipt layout)         │
//! │  4. Open ReceiptFile sink at the configured path                        │
//! │  5. Clear the screen                                                    │
//! │  6. Run the menu loop                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod args;
pub mod commands;
pub mod display;
pub mod error;
pub mod prompt;
pub mod state;

use anyhow::Context;
use console::Term;
use smartmart_store::ReceiptFile;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use args::Args;
pub use commands::{Command, MenuChoice, Session};
pub use error::{CliError, CliResult, ErrorCode};
pub use prompt::{Prompter, TerminalPrompter};
pub use state::AppConfig;

/// Runs the billing terminal until the session ends.
pub fn run(args: Args) -> anyhow::Result<()> {
    init_tracing(args.verbose);

    let config = AppConfig::from_env().with_args(&args);
    info!(
        store = %config.store_name,
        receipt_path = %config.receipt_path.display(),
        keep_open = config.keep_open,
        "SmartMart starting"
    );

    let engine = config
        .billing_engine()
        .context("Invalid billing configuration")?;
    let sink = ReceiptFile::new(config.store_config());

    if let Err(e) = Term::stdout().clear_screen() {
        debug!("Could not clear screen: {}", e);
    }

    let mut session = Session::new(
        engine,
        sink,
        TerminalPrompter::default(),
        std::io::stdout(),
        config,
    );
    session.run()?;

    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Everything, including dependencies
/// - `RUST_LOG=smartmart=trace` - Trace for SmartMart crates only
/// - Default: `warn,smartmart=info` (`debug` for SmartMart with `--verbose`)
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,smartmart=debug"
    } else {
        "warn,smartmart=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
