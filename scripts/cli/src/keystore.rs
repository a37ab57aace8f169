//! Password-encrypted keystore files (Web3 Secret Storage, version 3).
//!
//! The JSON layout is `eth-keystore`'s; key derivation, AES-128-CTR and the
//! keccak MAC are done here so the scrypt cost stays under our control.
//! New keystores always use scrypt. Reading also accepts PBKDF2-HMAC-SHA256.

use std::{fs, io::Write, path::Path};

use aes::cipher::{KeyIvInit, StreamCipher};
use alloy_primitives::{B256, keccak256};
use eth_keystore::{CipherparamsJson, CryptoJson, EthKeystore, KdfType, KdfparamsType};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::{
    account::Account,
    error::{Error, Result},
    paths,
};

type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;

const VERSION: u8 = 3;
const CIPHER: &str = "aes-128-ctr";
const PBKDF2_PRF: &str = "hmac-sha256";
const SALT_LEN: usize = 32;
const IV_LEN: usize = 16;
/// First half keys the cipher, second half keys the MAC.
const DERIVED_LEN: usize = 32;

/// scrypt work factor: N = 2^log_n, block size r, parallelism p.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptCost {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl ScryptCost {
    /// N = 262144, r = 8, p = 1. Roughly a second and 256 MiB per derivation.
    pub const STANDARD: Self = Self { log_n: 18, r: 8, p: 1 };
    /// N = 4096, r = 8, p = 6. For constrained machines.
    pub const LIGHT: Self = Self { log_n: 12, r: 8, p: 6 };

    pub fn n(&self) -> u32 {
        1 << self.log_n
    }
}

impl Default for ScryptCost {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Encrypt `account` under `password` and return the keystore JSON.
pub fn encrypt_json(account: &Account, password: &str, cost: ScryptCost) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);

    let derived = scrypt_key(password, &salt, cost.log_n, cost.r, cost.p)?;

    let mut ciphertext = account.to_bytes().to_vec();
    apply_cipher(&derived[..16], &iv, &mut ciphertext)?;
    let mac = mac(&derived, &ciphertext);

    let id = Uuid::new_v4();
    let keystore = EthKeystore {
        crypto: CryptoJson {
            cipher: CIPHER.to_string(),
            cipherparams: CipherparamsJson { iv: iv.to_vec() },
            ciphertext,
            kdf: KdfType::Scrypt,
            kdfparams: KdfparamsType::Scrypt {
                dklen: DERIVED_LEN as u8,
                n: cost.n(),
                p: cost.p,
                r: cost.r,
                salt: salt.to_vec(),
            },
            mac: mac.to_vec(),
        },
        id,
        version: VERSION,
    };

    debug!(%id, log_n = cost.log_n, r = cost.r, p = cost.p, "encrypted keystore");
    Ok(serde_json::to_string(&keystore)?)
}

/// Write keystore JSON to `path`. The file is created owner-only.
pub fn save(path: &Path, json: &str) -> Result<()> {
    let mut file =
        paths::secret_file(path).map_err(|e| Error::io("create keystore", path, e))?;
    file.write_all(json.as_bytes())
        .map_err(|e| Error::io("write keystore", path, e))?;
    debug!(path = %path.display(), "saved keystore");
    Ok(())
}

/// Read the JSON text of a keystore file.
pub fn read_json(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io("read keystore", path, e))
}

/// Decrypt keystore JSON. A wrong password fails the MAC check.
pub fn decrypt_json(json: &str, password: &str) -> Result<Account> {
    let keystore: EthKeystore = serde_json::from_str(json)?;
    if keystore.version != VERSION {
        return Err(Error::UnsupportedKeystore(format!("version {}", keystore.version)));
    }
    let crypto = &keystore.crypto;
    if crypto.cipher != CIPHER {
        return Err(Error::UnsupportedKeystore(format!("cipher {}", crypto.cipher)));
    }

    let derived = match (&crypto.kdf, &crypto.kdfparams) {
        (KdfType::Scrypt, KdfparamsType::Scrypt { dklen, n, p, r, salt }) => {
            check_dklen(*dklen)?;
            if *n < 2 || !n.is_power_of_two() {
                return Err(Error::Kdf(format!("scrypt n = {n} is not a power of two")));
            }
            scrypt_key(password, salt, n.trailing_zeros() as u8, *r, *p)?
        }
        (KdfType::Pbkdf2, KdfparamsType::Pbkdf2 { c, dklen, prf, salt }) => {
            check_dklen(*dklen)?;
            if prf != PBKDF2_PRF {
                return Err(Error::UnsupportedKeystore(format!("pbkdf2 prf {prf}")));
            }
            let mut key = Zeroizing::new([0u8; DERIVED_LEN]);
            pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, *c, key.as_mut_slice());
            key
        }
        (kdf, _) => {
            return Err(Error::UnsupportedKeystore(format!(
                "{kdf:?} with mismatched kdfparams"
            )));
        }
    };

    if mac(&derived, &crypto.ciphertext).as_slice() != crypto.mac.as_slice() {
        return Err(Error::MacMismatch);
    }

    let mut secret = Zeroizing::new(crypto.ciphertext.clone());
    apply_cipher(&derived[..16], &crypto.cipherparams.iv, &mut secret)?;
    debug!(id = %keystore.id, "decrypted keystore");
    Account::from_bytes(secret.as_slice())
}

/// Decrypt the keystore file at `path`.
pub fn decrypt(path: &Path, password: &str) -> Result<Account> {
    let json = read_json(path)?;
    decrypt_json(&json, password)
}

fn check_dklen(dklen: u8) -> Result<()> {
    if usize::from(dklen) < DERIVED_LEN {
        return Err(Error::Kdf(format!("dklen {dklen} is shorter than {DERIVED_LEN}")));
    }
    Ok(())
}

fn scrypt_key(
    password: &str,
    salt: &[u8],
    log_n: u8,
    r: u32,
    p: u32,
) -> Result<Zeroizing<[u8; DERIVED_LEN]>> {
    let params = scrypt::Params::new(log_n, r, p, DERIVED_LEN)
        .map_err(|e| Error::Kdf(format!("scrypt log_n = {log_n}, r = {r}, p = {p}: {e}")))?;
    let mut key = Zeroizing::new([0u8; DERIVED_LEN]);
    scrypt::scrypt(password.as_bytes(), salt, &params, key.as_mut_slice())
        .map_err(|e| Error::Kdf(e.to_string()))?;
    Ok(key)
}

fn apply_cipher(key: &[u8], iv: &[u8], data: &mut [u8]) -> Result<()> {
    let mut cipher = Aes128Ctr::new_from_slices(key, iv).map_err(|_| {
        Error::UnsupportedKeystore(format!("iv must be {IV_LEN} bytes, found {}", iv.len()))
    })?;
    cipher.apply_keystream(data);
    Ok(())
}

fn mac(derived: &[u8; DERIVED_LEN], ciphertext: &[u8]) -> B256 {
    keccak256([&derived[16..], ciphertext].concat())
}
