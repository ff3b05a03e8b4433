//! # Billing Engine
//!
//! Owns the catalog and the session's cart, and drives a bill through
//! generate → confirm → pay.
//!
//! ## Billing Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Billing Cycle                                    │
//! │                                                                         │
//! │  generate_bill() ──► Bill computed ──► PendingConfirm                   │
//! │                                            │                            │
//! │                         ┌──────────────────┴──────────────┐             │
//! │                         ▼                                 ▼             │
//! │                     confirm()                          abort()          │
//! │                         │                                 │             │
//! │                         ▼                                 ▼             │
//! │                  PendingPayment                      Cancelled          │
//! │                         │                          (cart untouched,     │
//! │                         ▼                           back to Ready)      │
//! │               select_payment(method, sink)                              │
//! │                         │                                               │
//! │            ┌────────────┴─────────────┐                                 │
//! │            ▼                          ▼                                 │
//! │     sink.persist() ok           sink.persist() failed                   │
//! │     cart cleared, Paid          cart kept, still PendingPayment,        │
//! │     → SessionSignal::Terminate  error carries the receipt               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failed call leaves the cart and the pending bill exactly as they
//! were.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::bill::Bill;
use crate::cart::{Cart, CartView};
use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{CoreError, CoreResult, SinkError};
use crate::receipt::{Receipt, ReceiptLayout};
use crate::types::{BillingState, PaymentMethod, SessionSignal, TaxRate};
use crate::validation::validate_tax_rate_bps;

// =============================================================================
// Receipt Sink
// =============================================================================

/// Where a paid receipt is handed for storage.
///
/// The engine clears the cart only after `persist` succeeds.
pub trait ReceiptSink {
    /// Stores the receipt, replacing whatever was stored before.
    fn persist(&mut self, receipt: &Receipt) -> Result<PersistReport, SinkError>;
}

/// Outcome of a successful persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistReport {
    /// Human-readable location (e.g. a file path).
    pub location: String,
    /// An earlier receipt was replaced.
    pub overwritten: bool,
}

/// Result of a completed payment.
#[derive(Debug, Clone)]
pub struct PaidBill {
    pub receipt: Receipt,
    pub persisted: PersistReport,
    /// Always [`SessionSignal::Terminate`]; the dispatcher decides whether to
    /// actually end the session.
    pub signal: SessionSignal,
}

// =============================================================================
// Billing Engine
// =============================================================================

#[derive(Debug, Clone)]
enum Pending {
    None,
    Confirm(Bill),
    Payment(Bill),
}

/// The cart and billing state for one session.
///
/// ## Example
/// ```rust
/// use smartmart_core::{BillingEngine, BillingState, Catalog};
///
/// let mut engine = BillingEngine::new(Catalog::smartmart());
/// assert_eq!(engine.state(), BillingState::Empty);
///
/// engine.add_item("Milk", 2).unwrap();
/// assert_eq!(engine.state(), BillingState::Ready);
///
/// let bill = engine.generate_bill().unwrap();
/// assert_eq!(bill.subtotal.units(), 80);
/// assert_eq!(engine.state(), BillingState::PendingConfirm);
/// ```
#[derive(Debug, Clone)]
pub struct BillingEngine {
    catalog: Catalog,
    cart: Cart,
    tax_rate: TaxRate,
    layout: ReceiptLayout,
    pending: Pending,
}

impl BillingEngine {
    /// Creates an engine with an empty cart, 18% tax and the default layout.
    pub fn new(catalog: Catalog) -> Self {
        BillingEngine {
            catalog,
            cart: Cart::new(),
            tax_rate: TaxRate::default(),
            layout: ReceiptLayout::default(),
            pending: Pending::None,
        }
    }

    /// Overrides the tax rate.
    ///
    /// ## Errors
    /// [`ValidationError::OutOfRange`](crate::error::ValidationError) when the
    /// rate is above 100%. Cart limits only guarantee that totals fit up to
    /// that rate.
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> CoreResult<Self> {
        validate_tax_rate_bps(tax_rate.bps())?;
        self.tax_rate = tax_rate;
        Ok(self)
    }

    /// Overrides the receipt layout.
    pub fn with_layout(mut self, layout: ReceiptLayout) -> Self {
        self.layout = layout;
        self
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// Current state, derived from the pending bill and the cart.
    pub fn state(&self) -> BillingState {
        match &self.pending {
            Pending::Confirm(_) => BillingState::PendingConfirm,
            Pending::Payment(_) => BillingState::PendingPayment,
            Pending::None if self.cart.is_empty() => BillingState::Empty,
            Pending::None => BillingState::Ready,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn layout(&self) -> &ReceiptLayout {
        &self.layout
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// The bill awaiting confirmation or payment, if any.
    pub fn pending_bill(&self) -> Option<&Bill> {
        match &self.pending {
            Pending::Confirm(bill) | Pending::Payment(bill) => Some(bill),
            Pending::None => None,
        }
    }

    /// Products for display, in catalog order.
    pub fn list_products(&self) -> &[CatalogEntry] {
        self.catalog.list()
    }

    /// Cart lines and untaxed subtotal.
    pub fn view_cart(&self) -> CartView {
        CartView::from(&self.cart)
    }

    // -------------------------------------------------------------------------
    // Cart mutation
    // -------------------------------------------------------------------------

    /// Adds a product to the cart. See [`Cart::add_item`].
    ///
    /// Rejected while a bill is pending, so the pending bill always matches
    /// the cart.
    pub fn add_item(&mut self, product: &str, quantity: i64) -> CoreResult<i64> {
        self.require_no_pending("add items")?;
        self.cart.add_item(&self.catalog, product, quantity)
    }

    // -------------------------------------------------------------------------
    // Billing cycle
    // -------------------------------------------------------------------------

    /// Computes a bill for the current cart, timestamped now (local time).
    pub fn generate_bill(&mut self) -> CoreResult<Bill> {
        self.generate_bill_at(Local::now().naive_local())
    }

    /// Computes a bill for the current cart with the given timestamp.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] when there is nothing to bill
    /// - [`CoreError::InvalidBillingState`] when a bill is already pending
    pub fn generate_bill_at(&mut self, timestamp: NaiveDateTime) -> CoreResult<Bill> {
        self.require_no_pending("generate a bill")?;
        if self.cart.is_empty() {
            debug!("Bill requested for empty cart");
            return Err(CoreError::EmptyCart);
        }

        let bill = Bill::compute(self.cart.snapshot(), self.tax_rate, timestamp)?;
        info!(
            bill_id = %bill.id,
            lines = bill.line_count(),
            subtotal = %bill.subtotal,
            tax = %bill.tax,
            total = %bill.total,
            "Bill generated"
        );

        self.pending = Pending::Confirm(bill.clone());
        Ok(bill)
    }

    /// Accepts the pending bill and moves on to payment.
    pub fn confirm(&mut self) -> CoreResult<()> {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::Confirm(bill) => {
                debug!(bill_id = %bill.id, "Bill confirmed, awaiting payment");
                self.pending = Pending::Payment(bill);
                Ok(())
            }
            other => {
                self.pending = other;
                Err(self.invalid_state("confirm"))
            }
        }
    }

    /// Drops the pending bill. The cart is left exactly as it was.
    ///
    /// Returns [`SessionSignal::Cancelled`].
    pub fn abort(&mut self) -> CoreResult<SessionSignal> {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::Confirm(bill) => {
                info!(bill_id = %bill.id, "Bill cancelled, cart kept");
                Ok(SessionSignal::Cancelled)
            }
            other => {
                self.pending = other;
                Err(self.invalid_state("cancel the bill"))
            }
        }
    }

    /// Parses a payment selection and completes payment.
    ///
    /// An unrecognized selection fails with
    /// [`CoreError::InvalidPaymentMethod`] and the bill stays pending, so the
    /// caller can simply ask again.
    pub fn select_payment<S>(&mut self, selection: &str, sink: &mut S) -> CoreResult<PaidBill>
    where
        S: ReceiptSink + ?Sized,
    {
        if !matches!(self.pending, Pending::Payment(_)) {
            return Err(self.invalid_state("select a payment method"));
        }
        let method = selection.parse::<PaymentMethod>()?;
        self.pay(method, sink)
    }

    /// Attaches the payment method, renders the receipt, persists it and
    /// clears the cart.
    ///
    /// ## Persistence failure
    /// The cart is not cleared and the bill remains pending payment. The
    /// returned [`CoreError::ReceiptPersistence`] carries the finalized
    /// receipt; calling `pay` again retries.
    pub fn pay<S>(&mut self, method: PaymentMethod, sink: &mut S) -> CoreResult<PaidBill>
    where
        S: ReceiptSink + ?Sized,
    {
        let bill = match &self.pending {
            Pending::Payment(bill) => bill,
            _ => return Err(self.invalid_state("select a payment method")),
        };

        let mut paid = bill.clone();
        paid.payment_method = Some(method);
        let receipt = Receipt::new(paid, &self.layout);

        let persisted = match sink.persist(&receipt) {
            Ok(report) => report,
            Err(source) => {
                warn!(bill_id = %receipt.bill.id, error = %source, "Receipt could not be persisted");
                return Err(CoreError::ReceiptPersistence {
                    receipt: Box::new(receipt),
                    source,
                });
            }
        };

        self.pending = Pending::None;
        self.cart.clear();
        info!(
            bill_id = %receipt.bill.id,
            method = %method,
            total = %receipt.bill.total,
            location = %persisted.location,
            "Bill paid"
        );

        Ok(PaidBill {
            receipt,
            persisted,
            signal: SessionSignal::Terminate,
        })
    }

    fn require_no_pending(&self, operation: &'static str) -> CoreResult<()> {
        match self.pending {
            Pending::None => Ok(()),
            _ => Err(self.invalid_state(operation)),
        }
    }

    fn invalid_state(&self, operation: &'static str) -> CoreError {
        CoreError::InvalidBillingState {
            operation,
            state: self.state(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::NaiveDate;

    #[derive(Default)]
    struct MemorySink {
        stored: Vec<String>,
        fail: bool,
    }

    impl ReceiptSink for MemorySink {
        fn persist(&mut self, receipt: &Receipt) -> Result<PersistReport, SinkError> {
            if self.fail {
                return Err("disk full".into());
            }
            let overwritten = !self.stored.is_empty();
            self.stored.push(receipt.text.clone());
            Ok(PersistReport {
                location: "memory".to_string(),
                overwritten,
            })
        }
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn ready_engine() -> BillingEngine {
        let catalog = Catalog::from_entries([("milk", 40), ("bread", 25)]).unwrap();
        let mut engine = BillingEngine::new(catalog);
        engine.add_item("Milk", 2).unwrap();
        engine.add_item("bread", 3).unwrap();
        engine
    }

    #[test]
    fn test_generate_bill_on_empty_cart() {
        let mut engine = BillingEngine::new(Catalog::smartmart());
        assert!(matches!(engine.generate_bill(), Err(CoreError::EmptyCart)));
        assert_eq!(engine.state(), BillingState::Empty);
        assert!(engine.pending_bill().is_none());
    }

    #[test]
    fn test_generate_bill_moves_to_pending_confirm() {
        let mut engine = ready_engine();
        let bill = engine.generate_bill_at(at()).unwrap();

        assert_eq!(bill.subtotal, Money::from_units(155));
        assert_eq!(bill.tax, Money::from_minor(2790));
        assert_eq!(bill.total, Money::from_minor(18290));
        assert_eq!(engine.state(), BillingState::PendingConfirm);
        assert_eq!(engine.pending_bill(), Some(&bill));
    }

    #[test]
    fn test_full_cycle_clears_cart() {
        let mut engine = ready_engine();
        let mut sink = MemorySink::default();

        engine.generate_bill_at(at()).unwrap();
        engine.confirm().unwrap();
        assert_eq!(engine.state(), BillingState::PendingPayment);

        let paid = engine.select_payment("upi", &mut sink).unwrap();

        assert_eq!(paid.signal, SessionSignal::Terminate);
        assert_eq!(paid.receipt.bill.payment_method, Some(PaymentMethod::Upi));
        assert!(paid.receipt.text.contains("Payment Method: UPI"));
        assert!(!paid.persisted.overwritten);
        assert_eq!(sink.stored, vec![paid.receipt.text.clone()]);
        assert!(engine.cart().is_empty());
        assert_eq!(engine.state(), BillingState::Empty);
    }

    #[test]
    fn test_abort_keeps_cart() {
        let mut engine = ready_engine();
        let before = engine.cart().clone();

        engine.generate_bill_at(at()).unwrap();
        assert_eq!(engine.abort().unwrap(), SessionSignal::Cancelled);

        assert_eq!(engine.cart(), &before);
        assert_eq!(engine.state(), BillingState::Ready);

        // Retry works after a cancel
        assert!(engine.generate_bill_at(at()).is_ok());
    }

    #[test]
    fn test_invalid_payment_method_keeps_bill_pending() {
        let mut engine = ready_engine();
        let mut sink = MemorySink::default();
        engine.generate_bill_at(at()).unwrap();
        engine.confirm().unwrap();

        let err = engine.select_payment("cheque", &mut sink).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPaymentMethod(_)));
        assert_eq!(engine.state(), BillingState::PendingPayment);
        assert!(sink.stored.is_empty());

        assert!(engine.select_payment("Cash", &mut sink).is_ok());
    }

    #[test]
    fn test_persist_failure_keeps_cart_and_bill() {
        let mut engine = ready_engine();
        let before = engine.cart().clone();
        let mut failing = MemorySink {
            fail: true,
            ..MemorySink::default()
        };

        engine.generate_bill_at(at()).unwrap();
        engine.confirm().unwrap();

        let err = engine.pay(PaymentMethod::Cash, &mut failing).unwrap_err();
        match err {
            CoreError::ReceiptPersistence { receipt, .. } => {
                assert!(receipt.text.contains("Payment Method: Cash"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(engine.cart(), &before);
        assert_eq!(engine.state(), BillingState::PendingPayment);

        let mut working = MemorySink::default();
        engine.pay(PaymentMethod::Cash, &mut working).unwrap();
        assert!(engine.cart().is_empty());
    }

    #[test]
    fn test_out_of_order_calls_are_rejected() {
        let mut engine = ready_engine();
        let mut sink = MemorySink::default();

        assert!(matches!(
            engine.confirm(),
            Err(CoreError::InvalidBillingState { state: BillingState::Ready, .. })
        ));
        assert!(matches!(
            engine.abort(),
            Err(CoreError::InvalidBillingState { .. })
        ));
        assert!(matches!(
            engine.select_payment("cash", &mut sink),
            Err(CoreError::InvalidBillingState { .. })
        ));

        engine.generate_bill_at(at()).unwrap();
        assert!(matches!(
            engine.select_payment("cash", &mut sink),
            Err(CoreError::InvalidBillingState { state: BillingState::PendingConfirm, .. })
        ));
        assert!(matches!(
            engine.add_item("milk", 1),
            Err(CoreError::InvalidBillingState { .. })
        ));
        assert!(matches!(
            engine.generate_bill_at(at()),
            Err(CoreError::InvalidBillingState { .. })
        ));

        engine.confirm().unwrap();
        assert!(matches!(
            engine.abort(),
            Err(CoreError::InvalidBillingState { state: BillingState::PendingPayment, .. })
        ));
        assert_eq!(engine.state(), BillingState::PendingPayment);
        assert_eq!(engine.cart().quantity_of("milk"), 2);
    }

    #[test]
    fn test_layout_and_tax_overrides() {
        let catalog = Catalog::from_entries([("tea", 100)]).unwrap();
        let mut engine = BillingEngine::new(catalog)
            .with_tax_rate(TaxRate::from_bps(500))
            .unwrap()
            .with_layout(ReceiptLayout::for_store("Corner Shop"));
        let mut sink = MemorySink::default();

        engine.add_item("tea", 1).unwrap();
        let bill = engine.generate_bill_at(at()).unwrap();
        assert_eq!(bill.tax, Money::from_units(5));

        engine.confirm().unwrap();
        let paid = engine.pay(PaymentMethod::DebitCard, &mut sink).unwrap();
        assert!(paid.receipt.text.contains(" CORNER SHOP BILL"));
        assert!(paid.receipt.text.contains("Tax (5%): ₹5.0"));
    }

    #[test]
    fn test_tax_rate_above_one_hundred_percent_is_rejected() {
        let result =
            BillingEngine::new(Catalog::smartmart()).with_tax_rate(TaxRate::from_bps(30000));
        assert!(matches!(
            result,
            Err(CoreError::Validation(crate::error::ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_largest_cart_bills_positive_total_at_full_rate() {
        let mut engine = BillingEngine::new(Catalog::smartmart())
            .with_tax_rate(TaxRate::from_bps(10000))
            .unwrap();

        // 4e18 paise, just under the subtotal cap
        engine.add_item("milk", 1_000_000_000_000_000).unwrap();
        let bill = engine.generate_bill_at(at()).unwrap();

        assert_eq!(bill.tax, bill.subtotal);
        assert_eq!(bill.total.minor(), 8_000_000_000_000_000_000);
        assert!(!bill.total.is_negative());
    }
}
