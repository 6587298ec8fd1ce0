//! Keystore error types.

use klay_keyring::KeyringError;
use klay_primitives::{ErrorKind, PrimitiveError};
use thiserror::Error;

/// Errors produced while encrypting or decrypting a keystore.
#[derive(Debug, Error)]
pub enum KeystoreError {
    #[error(transparent)]
    Keyring(#[from] KeyringError),

    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// MAC mismatch. Decryption was not attempted.
    #[error("key derivation failed (possibly wrong password)")]
    WrongPassword,

    #[error("unsupported kdf: {0}")]
    UnsupportedKdf(String),

    #[error("unsupported prf: {0}")]
    UnsupportedPrf(String),

    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),

    #[error("unsupported keystore version: {0}")]
    UnsupportedVersion(u32),

    /// A record carries both `crypto` and `keyring`.
    #[error("keystore carries both crypto and keyring fields")]
    BothCryptoAndKeyring,

    /// The record's version requires a field that is absent.
    #[error("keystore version {version} is missing the {field} field")]
    MissingField { version: u32, field: &'static str },

    #[error("invalid kdf parameters: {0}")]
    InvalidKdfParams(String),

    #[error("invalid cipher parameters: {0}")]
    InvalidCipherParams(String),

    #[error("invalid hex in {field}: {value}")]
    InvalidHex { field: &'static str, value: String },

    /// Multiple or role-based key material needs an explicit address.
    #[error("an address is required to encrypt multiple or role-based keys")]
    AddressRequired,

    /// v3 holds exactly one key.
    #[error("v3 keystore holds a single key; {0} keys found, use v4 encryption")]
    V3RequiresSingleKey(usize),

    #[error("cipher failure: {0}")]
    Cipher(String),

    #[error("invalid keystore json: {0}")]
    Json(#[from] serde_json::Error),
}

impl KeystoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KeystoreError::Keyring(err) => err.kind(),
            KeystoreError::Primitive(err) => err.kind(),
            KeystoreError::WrongPassword => ErrorKind::Authentication,
            KeystoreError::UnsupportedKdf(_)
            | KeystoreError::UnsupportedPrf(_)
            | KeystoreError::UnsupportedCipher(_) => ErrorKind::UnsupportedAlgorithm,
            KeystoreError::AddressRequired | KeystoreError::V3RequiresSingleKey(_) => {
                ErrorKind::PolicyViolation
            }
            KeystoreError::UnsupportedVersion(_)
            | KeystoreError::BothCryptoAndKeyring
            | KeystoreError::MissingField { .. }
            | KeystoreError::InvalidKdfParams(_)
            | KeystoreError::InvalidCipherParams(_)
            | KeystoreError::InvalidHex { .. }
            | KeystoreError::Cipher(_)
            | KeystoreError::Json(_) => ErrorKind::MalformedInput,
        }
    }
}

pub type KeystoreResult<T> = Result<T, KeystoreError>;
