//! Cart menu entries: Show Products, Add Item to Cart, View Cart.

use std::io::Write;

use smartmart_core::validation::parse_quantity;
use smartmart_core::{CoreError, ProductId, ReceiptSink, SessionSignal};
use tracing::info;

use super::{Command, Session};
use crate::display;
use crate::error::CliResult;
use crate::prompt::Prompter;

impl<P, S, W> Session<P, S, W>
where
    P: Prompter,
    S: ReceiptSink,
    W: Write,
{
    pub(crate) fn show_products(&mut self) -> CliResult<SessionSignal> {
        let listing = display::product_listing(&self.config, self.engine.list_products());
        writeln!(self.out, "\n{}", listing)?;
        Ok(SessionSignal::Continue)
    }

    /// Asks for a product, then a quantity.
    ///
    /// An unknown product is reported before the quantity is asked for, and
    /// nothing is asked while a bill is pending.
    pub(crate) fn read_add_item(&mut self) -> CliResult<Command> {
        if self.engine.pending_bill().is_some() {
            return Err(CoreError::InvalidBillingState {
                operation: "add items",
                state: self.engine.state(),
            }
            .into());
        }

        let product = self.prompter.input("Enter product name")?;
        self.engine.catalog().lookup(&product)?;

        let raw_quantity = self.prompter.input("Enter quantity")?;
        let quantity = parse_quantity(&raw_quantity)?;

        Ok(Command::AddItem {
            product: ProductId::new(&product),
            quantity,
        })
    }

    pub(crate) fn add_item(
        &mut self,
        product: &ProductId,
        quantity: i64,
    ) -> CliResult<SessionSignal> {
        let in_cart = self.engine.add_item(product.as_str(), quantity)?;
        let name = product.display_name();
        info!(product = %name, quantity, in_cart, "Item added");

        self.success_line(&format!("Added {} x {} to cart.", quantity, name))?;
        Ok(SessionSignal::Continue)
    }

    pub(crate) fn view_cart(&mut self) -> CliResult<SessionSignal> {
        let listing = display::cart_listing(self.engine.layout(), &self.engine.view_cart());
        writeln!(self.out, "\n{}", listing)?;
        Ok(SessionSignal::Continue)
    }
}
