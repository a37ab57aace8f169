//! Default storage locations and export file naming.

use std::{
    env,
    ffi::OsString,
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};

/// Name of the data directory created under the user's home.
pub const ACCOUNT_DIR: &str = "Account";
/// Sub-directory holding raw private key files.
pub const PRIVATE_KEY_DIR: &str = "PrivateKey";
/// Sub-directory holding encrypted keystore files.
pub const KEYSTORE_DIR: &str = "KeyStore";

/// The user's home directory: `$HOME` if set, otherwise the OS account database.
pub fn home_dir() -> Option<PathBuf> {
    home_dir_from(env::var_os("HOME"), dirs::home_dir)
}

/// `home` when it is set and non-empty, otherwise whatever `fallback` finds.
pub fn home_dir_from(
    home: Option<OsString>,
    fallback: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    match home {
        Some(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => fallback(),
    }
}

/// Platform-specific data directory beneath `home`.
pub fn data_dir_in(home: &Path) -> PathBuf {
    if cfg!(target_os = "macos") {
        home.join("Library").join("Application Support").join(ACCOUNT_DIR)
    } else if cfg!(windows) {
        home.join("AppData").join("Roaming").join(ACCOUNT_DIR)
    } else {
        home.join(ACCOUNT_DIR)
    }
}

/// Data directory used when no `--dir` is given, if a home directory exists.
pub fn default_data_dir() -> Option<PathBuf> {
    home_dir().map(|home| data_dir_in(&home))
}

/// Create the `PrivateKey` and `KeyStore` directories of the default data
/// directory. Returns the data directory, or `None` when there is no home.
pub fn ensure_default_dirs() -> Result<Option<PathBuf>> {
    let Some(data_dir) = default_data_dir() else {
        debug!("no home directory, skipping default data directory");
        return Ok(None);
    };
    ensure_dirs_in(&data_dir)?;
    Ok(Some(data_dir))
}

/// Create `data_dir/PrivateKey` and `data_dir/KeyStore`.
pub fn ensure_dirs_in(data_dir: &Path) -> Result<()> {
    private_key_dir_in(data_dir)?;
    keystore_dir_in(data_dir)?;
    debug!(path = %data_dir.display(), "data directory ready");
    Ok(())
}

/// Create `dir/KeyStore` and return it.
pub fn keystore_dir_in(dir: &Path) -> Result<PathBuf> {
    make_private_dir(dir.join(KEYSTORE_DIR))
}

/// Create `dir/PrivateKey` and return it.
pub fn private_key_dir_in(dir: &Path) -> Result<PathBuf> {
    make_private_dir(dir.join(PRIVATE_KEY_DIR))
}

fn make_private_dir(path: PathBuf) -> Result<PathBuf> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(&path)
        .map_err(|e| Error::io("create directory", &path, e))?;
    Ok(path)
}

/// File name for an exported key, e.g.
/// `UTC--2026-10-17T08-30-05.000000000Z--7e5f4552091a69125d5dfcb7b8c2659029395bdf`.
pub fn export_file_name(address: Address, now: DateTime<Utc>) -> String {
    format!(
        "UTC--{}--{}",
        now.format("%Y-%m-%dT%H-%M-%S%.9fZ"),
        hex::encode(address)
    )
}

/// Open `path` for writing secret material, owner-only on unix.
pub(crate) fn secret_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}
