//! Keyring error types.

use klay_primitives::{ErrorKind, PrimitiveError, Role};
use thiserror::Error;

/// Errors produced by key handling, signing and account-descriptor building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyringError {
    /// Address, digest or hex input failed validation.
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// Input is not a valid secp256k1 private key.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// A wallet key was passed where a bare private key is expected.
    #[error("key is in the KlaytnWalletKey format; use create_from_klaytn_wallet_key")]
    WalletKeyFormat,

    /// Input is not `privateKey ++ 0x00 ++ address`.
    #[error("invalid KlaytnWalletKey: {0}")]
    InvalidWalletKey(String),

    /// Role-based key material has more slots than there are roles.
    #[error("role-based key material has {0} roles, at most 3 are allowed")]
    WrongRoleCount(usize),

    /// A role holds more keys than allowed.
    #[error("{role} holds {count} keys, at most {max} are allowed")]
    TooManyKeys { role: Role, count: usize, max: usize },

    /// Neither the requested role nor the transaction role holds a key.
    #[error("no key defined for {0}")]
    EmptyRole(Role),

    /// Key index past the end of the resolved role list.
    #[error("index {index} is out of range for {role} holding {len} keys")]
    IndexOutOfRange { role: Role, index: usize, len: usize },

    /// Exactly one of role and index was supplied.
    #[error("role and index must be supplied together or not at all")]
    RoleIndexPairing,

    /// Wallet-key export needs exactly one transaction key and nothing else.
    #[error("KlaytnWalletKey export requires a single key in roleTransactionKey only")]
    WalletKeyExport,

    /// `chainId * 2 + 35` does not fit in `v`.
    #[error("chain id {0} is too large")]
    ChainIdOverflow(u64),

    /// The curve operation rejected the input.
    #[error("signing failed: {0}")]
    Signing(String),

    /// `v` does not map to a recovery id for the given chain.
    #[error("signature v {0} does not encode a recovery id")]
    InvalidRecoveryId(u64),

    /// Public key recovery failed.
    #[error("public key recovery failed: {0}")]
    Recovery(String),

    /// Every role is empty.
    #[error("keyring holds no keys")]
    NoKeys,

    /// Options were supplied in a shape the keyring cannot use.
    #[error("account key options mismatch: {0}")]
    OptionsMismatch(&'static str),

    /// Threshold or weights are inconsistent with the key list.
    #[error("invalid weighted multisig options: {0}")]
    InvalidMultiSigOptions(String),
}

impl KeyringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KeyringError::Primitive(err) => err.kind(),
            KeyringError::InvalidPrivateKey(_)
            | KeyringError::WalletKeyFormat
            | KeyringError::InvalidWalletKey(_)
            | KeyringError::WrongRoleCount(_)
            | KeyringError::IndexOutOfRange { .. }
            | KeyringError::RoleIndexPairing
            | KeyringError::ChainIdOverflow(_)
            | KeyringError::Signing(_)
            | KeyringError::InvalidRecoveryId(_)
            | KeyringError::Recovery(_) => ErrorKind::MalformedInput,
            KeyringError::TooManyKeys { .. }
            | KeyringError::EmptyRole(_)
            | KeyringError::WalletKeyExport
            | KeyringError::NoKeys
            | KeyringError::OptionsMismatch(_)
            | KeyringError::InvalidMultiSigOptions(_) => ErrorKind::PolicyViolation,
        }
    }
}

/// Result type for keyring operations.
pub type KeyringResult<T> = Result<T, KeyringError>;
