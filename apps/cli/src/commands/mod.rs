//! # Menu Commands
//!
//! The interactive session: menu loop, command parsing and dispatch.
//!
//! ## Session Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   print menu ──► prompter.input("Enter your choice (1-5)")              │
//! │        ▲                     │                                          │
//! │        │                     ▼                                          │
//! │        │        MenuChoice::from_choice()  ── None ──► "Invalid choice" │
//! │        │                     │                                          │
//! │        │                     ▼                                          │
//! │        │     read_command(choice)  (Add Item prompts name, quantity)    │
//! │        │                     │                                          │
//! │        │                     ▼                                          │
//! │        │              dispatch(command)                                 │
//! │        │     ┌───────────────┼────────────────────┐                     │
//! │        │     ▼               ▼                    ▼                     │
//! │        │  Continue /     Terminate            Err(CliError)             │
//! │        │  Cancelled   (Exit, or paid bill     recoverable: print it     │
//! │        │     │         without keep-open)     fatal: end session        │
//! │        └─────┘               │                                          │
//! │                              ▼                                          │
//! │                  "Thank you for using SmartMart!"                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`cart`] - Show Products, Add Item to Cart, View Cart
//! - [`bill`] - Generate Bill (confirm, pay, save)

pub mod bill;
pub mod cart;

use std::io::Write;

use console::style;
use smartmart_core::{BillingEngine, ProductId, ReceiptSink, SessionSignal};
use tracing::{debug, info};

use crate::display;
use crate::error::CliResult;
use crate::prompt::Prompter;
use crate::state::AppConfig;

/// Prompt shown under the menu.
pub const MENU_PROMPT: &str = "Enter your choice (1-5)";

/// One menu entry, as picked from the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListProducts,
    AddItem,
    ViewCart,
    GenerateBill,
    Exit,
}

impl MenuChoice {
    /// Maps a menu answer ("1".."5") to a menu entry.
    pub fn from_choice(choice: &str) -> Option<MenuChoice> {
        match choice.trim() {
            "1" => Some(MenuChoice::ListProducts),
            "2" => Some(MenuChoice::AddItem),
            "3" => Some(MenuChoice::ViewCart),
            "4" => Some(MenuChoice::GenerateBill),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// A command ready to run, with everything it needs already prompted for.
///
/// Generate Bill keeps its confirm and payment sub-prompts inside dispatch,
/// since they depend on the bill it computes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListProducts,
    AddItem { product: ProductId, quantity: i64 },
    ViewCart,
    GenerateBill,
    Exit,
}

/// One interactive billing session.
///
/// Generic over where answers come from, where receipts go and where output
/// is written, so the whole loop runs in tests without a terminal.
pub struct Session<P, S, W> {
    engine: BillingEngine,
    sink: S,
    prompter: P,
    out: W,
    config: AppConfig,
}

impl<P, S, W> Session<P, S, W>
where
    P: Prompter,
    S: ReceiptSink,
    W: Write,
{
    pub fn new(engine: BillingEngine, sink: S, prompter: P, out: W, config: AppConfig) -> Self {
        Session {
            engine,
            sink,
            prompter,
            out,
            config,
        }
    }

    pub fn engine(&self) -> &BillingEngine {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs the menu until the user exits, a bill is paid (unless
    /// `keep_open`), or the terminal fails.
    pub fn run(&mut self) -> CliResult<()> {
        info!(receipt_path = %self.config.receipt_path.display(), "Session started");

        loop {
            let menu = display::menu(&self.config);
            writeln!(self.out, "\n{}", menu)?;

            let answer = self.prompter.input(MENU_PROMPT)?;
            let choice = match MenuChoice::from_choice(&answer) {
                Some(choice) => choice,
                None => {
                    debug!(choice = %answer, "Invalid menu choice");
                    self.error_line("Invalid choice. Try again.")?;
                    continue;
                }
            };

            let outcome = self.read_command(choice).and_then(|command| self.dispatch(command));

            match outcome {
                Ok(SessionSignal::Terminate) => {
                    if choice == MenuChoice::Exit || !self.config.keep_open {
                        break;
                    }
                    debug!("Bill paid, keeping session open");
                }
                Ok(SessionSignal::Continue) | Ok(SessionSignal::Cancelled) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    debug!(code = ?err.code, "Command failed: {}", err.message);
                    self.error_line(&err.message)?;
                }
            }
        }

        writeln!(self.out, "\nThank you for using {}!", self.config.store_name)?;
        info!("Session ended");
        Ok(())
    }

    /// Prompts for whatever the chosen entry needs and builds its command.
    pub fn read_command(&mut self, choice: MenuChoice) -> CliResult<Command> {
        let command = match choice {
            MenuChoice::ListProducts => Command::ListProducts,
            MenuChoice::AddItem => self.read_add_item()?,
            MenuChoice::ViewCart => Command::ViewCart,
            MenuChoice::GenerateBill => Command::GenerateBill,
            MenuChoice::Exit => Command::Exit,
        };
        Ok(command)
    }

    /// Runs one command.
    pub fn dispatch(&mut self, command: Command) -> CliResult<SessionSignal> {
        debug!(?command, state = %self.engine.state(), "Dispatching");
        match command {
            Command::ListProducts => self.show_products(),
            Command::AddItem { product, quantity } => self.add_item(&product, quantity),
            Command::ViewCart => self.view_cart(),
            Command::GenerateBill => self.generate_bill(),
            Command::Exit => Ok(SessionSignal::Terminate),
        }
    }

    fn success_line(&mut self, message: &str) -> CliResult<()> {
        writeln!(self.out, "{}", style(message).green())?;
        Ok(())
    }

    fn warning_line(&mut self, message: &str) -> CliResult<()> {
        writeln!(self.out, "{}", style(message).yellow())?;
        Ok(())
    }

    fn error_line(&mut self, message: &str) -> CliResult<()> {
        writeln!(self.out, "{}", style(message).red())?;
        Ok(())
    }
}
