//! Raw private key files: 64 hex characters, no prefix, no trailing newline.

use std::{fs, io::Write, path::Path};

use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    account::{Account, PRIVATE_KEY_LEN},
    error::{Error, Result},
    paths,
};

/// Write the account's private key as hex. On unix only the owner can read it.
pub fn save(path: &Path, account: &Account) -> Result<()> {
    let encoded = Zeroizing::new(hex::encode(account.to_bytes().as_slice()));

    let mut file = paths::secret_file(path).map_err(|e| Error::io("create key file", path, e))?;
    file.write_all(encoded.as_bytes())
        .map_err(|e| Error::io("write key file", path, e))?;

    debug!(path = %path.display(), "saved private key");
    Ok(())
}

/// Read a private key file written by [`save`].
///
/// Surrounding whitespace and a `0x` prefix are tolerated.
pub fn load(path: &Path) -> Result<Account> {
    let contents = Zeroizing::new(
        fs::read_to_string(path).map_err(|e| Error::io("read key file", path, e))?,
    );
    let trimmed = contents.trim();
    let hex_key = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    let invalid = |reason: String| Error::InvalidKeyFile {
        path: path.to_path_buf(),
        reason,
    };

    if hex_key.len() != PRIVATE_KEY_LEN * 2 {
        return Err(invalid(format!(
            "want {} hex characters, found {}",
            PRIVATE_KEY_LEN * 2,
            hex_key.len()
        )));
    }
    let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
    hex::decode_to_slice(hex_key, bytes.as_mut_slice()).map_err(|e| invalid(e.to_string()))?;

    Account::from_bytes(bytes.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn save_writes_bare_hex() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        let account = Account::generate();

        save(&path, &account).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.len(), 64);
        assert!(!written.starts_with("0x"));
        assert_eq!(format!("0x{written}"), account.private_key_hex().as_str());
        assert_eq!(load(&path).unwrap().address(), account.address());
    }

    #[cfg(unix)]
    #[test]
    fn saved_key_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        save(&path, &Account::generate()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn load_tolerates_prefix_and_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        fs::write(&path, format!("0x{KEY_ONE}\n")).unwrap();

        let account = load(&path).unwrap();
        assert_eq!(account.address_hex(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
    }

    #[test]
    fn load_rejects_short_and_non_hex() {
        let dir = tempfile::tempdir().unwrap();

        let short = dir.path().join("short");
        fs::write(&short, &KEY_ONE[..60]).unwrap();
        assert!(matches!(load(&short), Err(Error::InvalidKeyFile { .. })));

        let garbage = dir.path().join("garbage");
        fs::write(&garbage, "zz".repeat(32)).unwrap();
        assert!(matches!(load(&garbage), Err(Error::InvalidKeyFile { .. })));
    }

    #[test]
    fn load_rejects_zero_scalar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero");
        fs::write(&path, "0".repeat(64)).unwrap();
        assert!(matches!(load(&path), Err(Error::InvalidPrivateKey(_))));
    }

    #[test]
    fn load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
