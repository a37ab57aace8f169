//! Passphrase entry.

use std::io;

use zeroize::Zeroizing;

use crate::error::{Error, Result};

pub const ENTER_PROMPT: &str = "Enter passphrase: ";
pub const CONFIRM_PROMPT: &str = "Confirm passphrase: ";

/// Source of passphrases.
pub trait PasswordPrompt {
    /// Show `prompt` and read one line without echoing it.
    fn read_password(&mut self, prompt: &str) -> io::Result<Zeroizing<String>>;
}

/// Reads from the controlling terminal, so piping stdout does not swallow the prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct TtyPrompt;

impl PasswordPrompt for TtyPrompt {
    fn read_password(&mut self, prompt: &str) -> io::Result<Zeroizing<String>> {
        rpassword::prompt_password(prompt).map(Zeroizing::new)
    }
}

/// Ask for a new passphrase twice. Empty passphrases are refused.
pub fn new_passphrase(prompt: &mut dyn PasswordPrompt) -> Result<Zeroizing<String>> {
    let password = prompt.read_password(ENTER_PROMPT).map_err(Error::Prompt)?;
    if password.is_empty() {
        return Err(Error::EmptyPassphrase);
    }
    let confirm = prompt.read_password(CONFIRM_PROMPT).map_err(Error::Prompt)?;
    if *password != *confirm {
        return Err(Error::PassphraseMismatch);
    }
    Ok(password)
}

/// Ask once for the passphrase of an existing keystore.
pub fn existing_passphrase(prompt: &mut dyn PasswordPrompt) -> Result<Zeroizing<String>> {
    prompt.read_password(ENTER_PROMPT).map_err(Error::Prompt)
}
