//! `egp`: create an ECDSA (secp256k1) account or parse one back.
//!
//! Keys are written either as raw hex private key files or as
//! password-encrypted keystores. Keys come from `k256`, addresses from
//! `alloy-primitives`; keystores use `eth-keystore`'s JSON types with
//! `scrypt` and AES-128-CTR.

pub mod account;
pub mod create;
pub mod error;
pub mod keyfile;
pub mod keystore;
pub mod parse;
pub mod paths;
pub mod prompt;
pub mod version;

pub use account::Account;
pub use error::{Error, Result};
pub use version::version;
