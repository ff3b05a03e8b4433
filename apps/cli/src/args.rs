use std::path::PathBuf;

use clap::Parser;

/// Command-line flags. Anything given here wins over `SMARTMART_*`
/// environment variables.
#[derive(Debug, Default, Parser)]
#[command(name = "smartmart")]
#[command(about = "SmartMart billing terminal: build a cart, bill it, save the receipt")]
#[command(version)]
pub struct Args {
    /// Where the paid receipt is written (default: bill.txt)
    #[arg(long, value_name = "PATH")]
    pub receipt_path: Option<PathBuf>,

    /// Return to the menu after a bill is paid instead of exiting
    #[arg(long)]
    pub keep_open: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
