//! Menu sessions driven by a scripted prompter.

use std::collections::VecDeque;
use std::fs;

use smartmart_cli::{AppConfig, CliError, CliResult, ErrorCode, Prompter, Session};
use smartmart_core::{PersistReport, Receipt, ReceiptSink, SinkError};
use smartmart_store::ReceiptFile;
use tempfile::TempDir;

// =============================================================================
// Test doubles
// =============================================================================

#[derive(Debug)]
enum Answer {
    Text(&'static str),
    Yes,
    No,
    Pick(usize),
}

use Answer::*;

#[derive(Default)]
struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    fn new(answers: Vec<Answer>) -> Self {
        ScriptedPrompter {
            answers: answers.into(),
            asked: Vec::new(),
        }
    }

    fn next(&mut self, prompt: &str) -> CliResult<Answer> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| CliError::internal("script exhausted"))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> CliResult<String> {
        match self.next(prompt)? {
            Text(text) => Ok(text.to_string()),
            other => panic!("expected text for {:?}, script has {:?}", prompt, other),
        }
    }

    fn confirm(&mut self, prompt: &str) -> CliResult<bool> {
        match self.next(prompt)? {
            Yes => Ok(true),
            No => Ok(false),
            other => panic!("expected yes/no for {:?}, script has {:?}", prompt, other),
        }
    }

    fn select(&mut self, prompt: &str, _items: &[&str]) -> CliResult<usize> {
        match self.next(prompt)? {
            Pick(index) => Ok(index),
            other => panic!("expected a pick for {:?}, script has {:?}", prompt, other),
        }
    }
}

/// Keeps every receipt; fails the first `failures` writes.
#[derive(Default)]
struct MemorySink {
    receipts: Vec<String>,
    failures: usize,
}

impl ReceiptSink for MemorySink {
    fn persist(&mut self, receipt: &Receipt) -> Result<PersistReport, SinkError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err("disk full".into());
        }
        let overwritten = !self.receipts.is_empty();
        self.receipts.push(receipt.text.clone());
        Ok(PersistReport {
            location: "memory".to_string(),
            overwritten,
        })
    }
}

type TestSession<S> = Session<ScriptedPrompter, S, Vec<u8>>;

fn session_with<S: ReceiptSink>(
    config: AppConfig,
    sink: S,
    answers: Vec<Answer>,
) -> TestSession<S> {
    console::set_colors_enabled(false);
    Session::new(
        config.billing_engine().unwrap(),
        sink,
        ScriptedPrompter::new(answers),
        Vec::new(),
        config,
    )
}

fn session(answers: Vec<Answer>) -> TestSession<MemorySink> {
    session_with(AppConfig::default(), MemorySink::default(), answers)
}

fn output<S>(session: &TestSession<S>) -> String
where
    S: ReceiptSink,
{
    String::from_utf8(session.output().clone()).unwrap()
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_milk_and_bread_paid_by_upi() {
    // One menu visit per row: choice, then its sub-prompt answers
    #[rustfmt::skip]
    let answers = vec![
        Text("2"), Text("milk"), Text("2"),
        Text("2"), Text("Bread"), Text("3"),
        Text("3"),
        Text("4"), Yes, Pick(2),
    ];
    let mut session = session(answers);

    session.run().unwrap();

    let out = output(&session);
    for needle in [
        "====== SMARTMART BILLING SYSTEM ======",
        "Added 2 x Milk to cart.",
        "Added 3 x Bread to cart.",
        "Your Cart:",
        "Subtotal: ₹155",
        "Tax (18%): ₹27.9",
        "Total: ₹182.9",
        "Payment Method: UPI",
        "Bill saved as 'memory'",
        "Thank you for using SmartMart!",
    ] {
        assert!(out.contains(needle), "missing {:?} in:\n{}", needle, out);
    }
    assert!(!out.contains("Overwriting"));

    assert!(session.engine().cart().is_empty());
    assert_eq!(session.sink().receipts.len(), 1);
    assert!(session.sink().receipts[0].contains("Payment Method: UPI"));
}

#[test]
fn test_bad_input_leaves_cart_untouched() {
    #[rustfmt::skip]
    let answers = vec![
        Text("7"),
        Text("2"), Text("mango"),
        Text("2"), Text("milk"), Text("abc"),
        Text("2"), Text("milk"), Text("0"),
        Text("3"),
        Text("5"),
    ];
    let mut session = session(answers);

    session.run().unwrap();

    let out = output(&session);
    assert!(out.contains("Invalid choice. Try again."));
    assert!(out.contains("Item 'mango' not found! Try again."));
    assert!(out.contains("Invalid quantity 'abc'"));
    assert!(out.contains("Invalid quantity '0'"));
    assert!(out.contains("Cart is empty."));
    assert!(session.engine().cart().is_empty());

    // Quantity is only asked for known products
    let asked = &session.prompter().asked;
    assert_eq!(asked[2], "Enter product name");
    assert_eq!(asked[3], "Enter your choice (1-5)");
}

#[test]
fn test_show_products() {
    let mut session = session(vec![Text("1"), Text("5")]);
    session.run().unwrap();

    let out = output(&session);
    assert!(out.contains("Available Products:"));
    assert!(out.contains("Oil             ₹150"));
    assert!(out.contains("Juice           ₹35"));
}

#[test]
fn test_empty_cart_cannot_be_billed() {
    let mut session = session(vec![Text("4"), Text("5")]);
    session.run().unwrap();

    assert!(output(&session).contains("Cannot generate bill: cart is empty"));
    assert!(session.sink().receipts.is_empty());
}

#[test]
fn test_declined_bill_keeps_cart() {
    #[rustfmt::skip]
    let answers = vec![
        Text("2"), Text("eggs"), Text("12"),
        Text("4"), No,
        Text("3"),
        Text("5"),
    ];
    let mut session = session(answers);

    session.run().unwrap();

    let out = output(&session);
    assert!(out.contains("Bill cancelled. Your cart is unchanged."));
    assert!(out.contains("Eggs            x 12  = ₹72"));
    assert_eq!(session.engine().cart().quantity_of("eggs"), 12);
    assert!(session.sink().receipts.is_empty());
}

#[test]
fn test_keep_open_allows_second_bill() {
    let config = AppConfig {
        keep_open: true,
        ..AppConfig::default()
    };
    #[rustfmt::skip]
    let answers = vec![
        Text("2"), Text("rice"), Text("1"), Text("4"), Yes, Pick(0),
        Text("2"), Text("salt"), Text("2"), Text("4"), Yes, Pick(3),
        Text("5"),
    ];
    let mut session = session_with(config, MemorySink::default(), answers);

    session.run().unwrap();

    let receipts = &session.sink().receipts;
    assert_eq!(receipts.len(), 2);
    assert!(receipts[0].contains("Payment Method: Cash"));
    assert!(receipts[1].contains("Payment Method: Debit Card"));
    assert!(!receipts[1].contains("Rice"));
    assert!(output(&session).contains("'memory' already exists. Overwriting..."));
}

#[test]
fn test_failed_save_can_be_retried() {
    let sink = MemorySink {
        failures: 1,
        ..MemorySink::default()
    };
    #[rustfmt::skip]
    let answers = vec![
        Text("2"), Text("milk"), Text("1"),
        Text("4"), Yes, Pick(0),
        Text("2"),
        Text("4"), Pick(1),
    ];
    let mut session = session_with(AppConfig::default(), sink, answers);

    session.run().unwrap();

    let out = output(&session);
    assert!(out.contains("Receipt could not be saved: disk full"));
    assert!(out.contains("Cannot add items while billing is awaiting payment"));
    assert!(out.contains("A bill is still waiting to be saved."));

    let receipts = &session.sink().receipts;
    assert_eq!(receipts.len(), 1);
    assert!(receipts[0].contains("Payment Method: Credit Card"));
    assert!(session.engine().cart().is_empty());
}

#[test]
fn test_prompt_failure_ends_session() {
    let mut session = session(vec![Text("2"), Text("milk")]);

    let err = session.run().unwrap_err();
    assert_eq!(err.code, ErrorCode::Internal);
}

#[test]
fn test_receipt_file_matches_printed_receipt() {
    let dir = TempDir::new().unwrap();
    // Parent directory does not exist yet; the configured store creates it
    let path = dir.path().join("receipts").join("bill.txt");
    let config = AppConfig {
        receipt_path: path.clone(),
        ..AppConfig::default()
    };
    let sink = ReceiptFile::new(config.store_config());

    let answers = vec![Text("2"), Text("oil"), Text("1"), Text("4"), Yes, Pick(1)];
    let mut session = session_with(config, sink, answers);

    session.run().unwrap();

    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.starts_with("===================================\n SMARTMART BILL\n"));
    assert!(saved.contains("Oil             x 1   = ₹150"));
    assert!(saved.contains("Tax (18%): ₹27.0"));
    assert!(saved.contains("Total: ₹177.0"));
    assert!(saved.ends_with("Thank you for shopping at SmartMart!\n==================================="));

    let out = output(&session);
    assert!(out.contains(&saved));
    assert!(out.contains(&format!("Bill saved as '{}'", path.display())));
}
