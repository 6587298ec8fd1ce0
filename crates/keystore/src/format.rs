//! JSON model of v3 and v4 keystores.
//!
//! v3 (single key):
//!
//! ```json
//! { "version": 3, "id": "...", "address": "0x...",
//!   "crypto": { "ciphertext": "...", "cipherparams": { "iv": "..." }, "cipher": "aes-128-ctr",
//!               "kdf": "scrypt", "kdfparams": { "dklen": 32, "salt": "...", "n": 4096, "r": 8, "p": 1 },
//!               "mac": "..." } }
//! ```
//!
//! v4 replaces `crypto` with `keyring`, either a flat list of crypto objects or
//! three lists of them, one per role.

use serde::{Deserialize, Serialize};

pub const VERSION_3: u32 = 3;
pub const VERSION_4: u32 = 4;

/// One encrypted private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoJson {
    pub ciphertext: String,
    pub cipherparams: CipherParams,
    pub cipher: String,
    pub kdf: String,
    pub kdfparams: KdfParams,
    pub mac: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    pub iv: String,
}

/// Union of the scrypt (`n`, `r`, `p`) and pbkdf2 (`c`, `prf`) parameter sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub dklen: u32,
    pub salt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prf: Option<String>,
}

/// The `keyring` field of a v4 keystore.
///
/// The role-based form is tried first; an empty list parses as role-based with no
/// roles, which decrypts to the same empty keyring as an empty flat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyringJson {
    RoleBased(Vec<Vec<CryptoJson>>),
    Flat(Vec<CryptoJson>),
}

impl KeyringJson {
    pub fn key_count(&self) -> usize {
        match self {
            KeyringJson::RoleBased(roles) => roles.iter().map(Vec::len).sum(),
            KeyringJson::Flat(keys) => keys.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreV3 {
    pub version: u32,
    pub id: String,
    pub address: String,
    pub crypto: CryptoJson,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreV4 {
    pub version: u32,
    pub id: String,
    pub address: String,
    pub keyring: KeyringJson,
}

/// Any keystore as read from disk, before version checks.
///
/// `address` may be absent in third-party v3 files; `Crypto` is accepted as an
/// alias for `crypto`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreRecord {
    pub version: u32,
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, alias = "Crypto", skip_serializing_if = "Option::is_none")]
    pub crypto: Option<CryptoJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyring: Option<KeyringJson>,
}

impl From<KeystoreV3> for KeystoreRecord {
    fn from(keystore: KeystoreV3) -> Self {
        Self {
            version: keystore.version,
            id: keystore.id,
            address: Some(keystore.address),
            crypto: Some(keystore.crypto),
            keyring: None,
        }
    }
}

impl From<KeystoreV4> for KeystoreRecord {
    fn from(keystore: KeystoreV4) -> Self {
        Self {
            version: keystore.version,
            id: keystore.id,
            address: Some(keystore.address),
            crypto: None,
            keyring: Some(keystore.keyring),
        }
    }
}
