//! # Prompts
//!
//! Every question the shell asks goes through [`Prompter`], so the menu
//! loop can be driven by a script in tests and by `dialoguer` in the
//! terminal.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::CliResult;

/// Source of user answers.
pub trait Prompter {
    /// Free text (menu choice, product name, quantity). May be empty.
    fn input(&mut self, prompt: &str) -> CliResult<String>;

    /// Yes/no question.
    fn confirm(&mut self, prompt: &str) -> CliResult<bool>;

    /// Pick one of `items`; returns its index.
    fn select(&mut self, prompt: &str, items: &[&str]) -> CliResult<usize>;
}

/// Interactive prompts on the controlling terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        TerminalPrompter {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> CliResult<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str) -> CliResult<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(true)
            .interact()?;
        Ok(answer)
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> CliResult<usize> {
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }
}
