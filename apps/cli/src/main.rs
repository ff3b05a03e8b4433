//! SmartMart billing terminal.
//!
//! ```text
//! smartmart [--receipt-path PATH] [--keep-open] [--verbose]
//! ```

use anyhow::Result;
use clap::Parser;
use smartmart_cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    smartmart_cli::run(args)
}
