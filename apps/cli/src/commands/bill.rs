//! # Generate Bill
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  state Empty/Ready ──► generate_bill() ──► print preview                │
//! │                                                │                        │
//! │                              "Proceed to payment?"                      │
//! │                          no ─────┴───── yes                             │
//! │                          │               │                              │
//! │                      abort()         confirm()                          │
//! │                   Cancelled,             │                              │
//! │                   cart kept              ▼                              │
//! │  state PendingPayment ───────────► select payment method                │
//! │  (earlier save failed)                   │                              │
//! │                                          ▼                              │
//! │                          select_payment(label, sink)                    │
//! │                                          │                              │
//! │                    print receipt, overwrite warning, saved path         │
//! │                                          │                              │
//! │                                 SessionSignal::Terminate                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use smartmart_core::{BillingState, PaymentMethod, ReceiptSink, SessionSignal};
use tracing::{debug, info};

use super::Session;
use crate::error::{CliError, CliResult, ErrorCode};
use crate::prompt::Prompter;

impl<P, S, W> Session<P, S, W>
where
    P: Prompter,
    S: ReceiptSink,
    W: Write,
{
    pub(crate) fn generate_bill(&mut self) -> CliResult<SessionSignal> {
        if self.engine.state() == BillingState::PendingPayment {
            // A previous attempt was paid for but not saved
            self.warning_line("A bill is still waiting to be saved. Retrying payment.")?;
        } else {
            let bill = self.engine.generate_bill()?;
            let preview = self.engine.layout().render(&bill);
            writeln!(self.out, "\n{}", preview)?;

            if !self.prompter.confirm("Proceed to payment?")? {
                let signal = self.engine.abort()?;
                self.warning_line("Bill cancelled. Your cart is unchanged.")?;
                return Ok(signal);
            }
            self.engine.confirm()?;
        }

        self.take_payment()
    }

    fn take_payment(&mut self) -> CliResult<SessionSignal> {
        let labels: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.label()).collect();
        let index = self.prompter.select("Select payment method", &labels)?;
        let label = labels.get(index).copied().ok_or_else(|| {
            CliError::new(
                ErrorCode::PaymentError,
                format!("Invalid payment method selection: {}", index),
            )
        })?;
        debug!(method = label, "Payment method selected");

        let paid = self.engine.select_payment(label, &mut self.sink)?;

        writeln!(self.out, "\n{}", paid.receipt.text)?;
        if paid.persisted.overwritten {
            self.warning_line(&format!(
                "'{}' already exists. Overwriting...",
                paid.persisted.location
            ))?;
        }
        self.success_line(&format!("Bill saved as '{}'", paid.persisted.location))?;
        info!(bill_id = %paid.receipt.bill.id, "Receipt delivered");

        Ok(paid.signal)
    }
}
