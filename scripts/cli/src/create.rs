//! The `create` command: generate a key pair and show or export it.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use alloy_primitives::Address;
use chrono::Utc;
use tracing::{debug, warn};

use crate::{
    account::Account,
    error::{Error, Result},
    keyfile,
    keystore::{self, ScryptCost},
    paths,
    prompt::{self, PasswordPrompt},
};

/// Printed when a command is given nothing to do.
pub const NOTHING_TO_DO: &str = "should specify `priv` or `keystore`";

pub(crate) const RULE: &str = "=================================";

/// Arguments for the create command.
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Print the raw private key and address.
    pub private_key: bool,
    /// Encrypt the key into a keystore.
    pub keystore: bool,
    /// Save whatever was requested to disk.
    pub export: bool,
    /// Export root given on the command line.
    pub dir: Option<PathBuf>,
    /// Export root used when `dir` is absent.
    pub default_dir: Option<PathBuf>,
    /// Print the keystore JSON. Only set when stdout is a terminal.
    pub show_keystore: bool,
    /// scrypt work factor for new keystores.
    pub scrypt: ScryptCost,
}

impl CreateArgs {
    fn export_root(&self) -> Result<Option<&Path>> {
        if !self.export {
            if self.dir.is_some() {
                warn!("--dir has no effect without --export");
            }
            return Ok(None);
        }
        self.dir
            .as_deref()
            .or(self.default_dir.as_deref())
            .map(Some)
            .ok_or(Error::NoDataDir)
    }
}

/// What a create run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CreateReport {
    /// Address of the generated key, `None` if nothing was requested.
    pub address: Option<Address>,
    pub keystore_path: Option<PathBuf>,
    pub private_key_path: Option<PathBuf>,
}

/// Run the create command, writing the human-readable result to `out`.
pub fn run(
    args: &CreateArgs,
    prompt: &mut dyn PasswordPrompt,
    out: &mut dyn Write,
) -> Result<CreateReport> {
    if !args.private_key && !args.keystore {
        writeln!(out, "{NOTHING_TO_DO}").map_err(Error::Output)?;
        return Ok(CreateReport::default());
    }
    let export_root = args.export_root()?;

    let account = Account::generate();
    let name = paths::export_file_name(account.address(), Utc::now());
    debug!(address = %account.address(), "generated account");

    let mut report = CreateReport {
        address: Some(account.address()),
        ..Default::default()
    };

    if args.keystore {
        report.keystore_path = write_keystore(args, export_root, &account, &name, prompt, out)?;
    }
    if args.private_key {
        report.private_key_path = write_private_key(export_root, &account, &name, out)?;
    }

    Ok(report)
}

fn write_keystore(
    args: &CreateArgs,
    export_root: Option<&Path>,
    account: &Account,
    name: &str,
    prompt: &mut dyn PasswordPrompt,
    out: &mut dyn Write,
) -> Result<Option<PathBuf>> {
    let password = prompt::new_passphrase(prompt)?;

    if export_root.is_none() && !args.show_keystore {
        warn!("stdout is not a terminal and --export is not set, keystore was not kept");
        return Ok(None);
    }

    let json = keystore::encrypt_json(account, &password, args.scrypt)?;
    let saved = match export_root {
        Some(root) => {
            let path = paths::keystore_dir_in(root)?.join(name);
            keystore::save(&path, &json)?;
            Some(path)
        }
        None => None,
    };

    if args.show_keystore {
        emit(out, &["========= JSON keystore =========", json.as_str(), RULE])?;
    }
    if let Some(path) = &saved {
        let line = format!("KeyStore has been saved at: {}", path.display());
        emit(out, &[line.as_str(), RULE])?;
    }
    Ok(saved)
}

fn write_private_key(
    export_root: Option<&Path>,
    account: &Account,
    name: &str,
    out: &mut dyn Write,
) -> Result<Option<PathBuf>> {
    emit(
        out,
        &[
            "==== your private key of hex ====",
            account.private_key_hex().as_str(),
            "========= your address ==========",
            account.address_hex().as_str(),
            RULE,
        ],
    )?;

    let Some(root) = export_root else {
        return Ok(None);
    };
    let path = paths::private_key_dir_in(root)?.join(name);
    keyfile::save(&path, account)?;

    let line = format!("private key has been saved at: {}", path.display());
    emit(out, &[line.as_str(), RULE])?;
    Ok(Some(path))
}

pub(crate) fn emit(out: &mut dyn Write, lines: &[&str]) -> Result<()> {
    for line in lines {
        writeln!(out, "{line}").map_err(Error::Output)?;
    }
    Ok(())
}
