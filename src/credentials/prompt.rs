//! Interactive line prompts

use crate::error::CredentialError;
use std::io::{self, BufRead, Write};

/// Line input from the user
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Read a line without echo. `label` names the value in the empty-input error.
    fn prompt_masked(&self, message: &str, label: &str) -> Result<String, CredentialError>;

    /// Read a visible line
    fn prompt_plain(&self, message: &str, label: &str) -> Result<String, CredentialError>;
}

/// Prompter reading from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt_masked(&self, message: &str, label: &str) -> Result<String, CredentialError> {
        let input = rpassword::prompt_password(message)?;
        normalize_input(&input, label)
    }

    fn prompt_plain(&self, message: &str, label: &str) -> Result<String, CredentialError> {
        let mut stdout = io::stdout();
        write!(stdout, "{message}")?;
        stdout.flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        normalize_input(&input, label)
    }
}

/// Trim surrounding whitespace, rejecting empty answers
pub fn normalize_input(input: &str, label: &str) -> Result<String, CredentialError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CredentialError::EmptyInput(label.to_string()));
    }
    Ok(trimmed.to_string())
}
