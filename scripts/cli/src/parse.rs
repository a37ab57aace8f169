//! The `parse` command: recover the address, and for keystores the private
//! key, from a file on disk.

use std::{io::Write, path::PathBuf};

use alloy_primitives::Address;
use tracing::{debug, warn};

use crate::{
    create::{NOTHING_TO_DO, emit},
    error::{Error, Result},
    keyfile, keystore,
    prompt::{self, PasswordPrompt},
};

/// Arguments for the parse command.
#[derive(Debug, Clone, Default)]
pub struct ParseArgs {
    /// Path of a raw private key file. Wins over `keystore` when both are set.
    pub private_key: Option<PathBuf>,
    /// Path of an encrypted keystore.
    pub keystore: Option<PathBuf>,
}

/// Run the parse command. Returns the recovered address, if any file was given.
pub fn run(
    args: &ParseArgs,
    prompt: &mut dyn PasswordPrompt,
    out: &mut dyn Write,
) -> Result<Option<Address>> {
    if let Some(path) = &args.private_key {
        if args.keystore.is_some() {
            warn!("both --priv and --keystore given, only --priv is parsed");
        }
        debug!(path = %path.display(), "loading private key");
        let account = keyfile::load(path)?;
        emit(
            out,
            &[
                "=====  your address ====",
                account.address_hex().as_str(),
                "========================",
            ],
        )?;
        return Ok(Some(account.address()));
    }

    let Some(path) = &args.keystore else {
        writeln!(out, "{NOTHING_TO_DO}").map_err(Error::Output)?;
        return Ok(None);
    };

    // Fail on an unreadable file before asking for anything.
    let json = keystore::read_json(path)?;
    let password = prompt::existing_passphrase(prompt)?;
    let account = keystore::decrypt_json(&json, &password)?;
    emit(
        out,
        &[
            "=====  your private key ====",
            account.private_key_hex().as_str(),
            "======   your address  =====",
            account.address_hex().as_str(),
            "============================",
        ],
    )?;
    Ok(Some(account.address()))
}
