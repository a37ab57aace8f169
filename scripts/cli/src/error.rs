//! Error types for key creation and parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while creating or parsing an account.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem access failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing to the output stream failed.
    #[error("write output: {0}")]
    Output(#[source] std::io::Error),
    /// Reading a passphrase from the terminal failed.
    #[error("read passphrase: {0}")]
    Prompt(#[source] std::io::Error),
    /// A raw key file does not hold 64 hex characters.
    #[error("invalid key file {}: {reason}", .path.display())]
    InvalidKeyFile { path: PathBuf, reason: String },
    /// The bytes are not a valid secp256k1 scalar.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    /// The keystore is not valid JSON or misses required fields.
    #[error("malformed keystore: {0}")]
    KeystoreJson(#[from] serde_json::Error),
    /// The keystore uses a version, cipher or KDF this tool does not handle.
    #[error("unsupported keystore: {0}")]
    UnsupportedKeystore(String),
    /// The KDF parameters are out of range.
    #[error("key derivation: {0}")]
    Kdf(String),
    /// Wrong passphrase or a tampered keystore.
    #[error("could not decrypt key with given passphrase")]
    MacMismatch,
    #[error("non-empty passphrase required")]
    EmptyPassphrase,
    #[error("passphrase confirmation mismatch")]
    PassphraseMismatch,
    /// Export requested but neither `--dir` nor a home directory is available.
    #[error("cannot determine a home directory, pass --dir to choose where to export")]
    NoDataDir,
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
