//! Transaction error types.

use alloy_primitives::Address;
use klay_keyring::KeyringError;
use klay_primitives::{ErrorKind, PrimitiveError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    #[error(transparent)]
    Keyring(#[from] KeyringError),

    #[error("rlp: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    #[error("empty transaction input")]
    EmptyInput,

    /// Raw bytes start with a different type tag than the decoder expects.
    #[error("type tag mismatch: expected {expected:#04x}, found {found:#04x}")]
    TypeTagMismatch { expected: u8, found: u8 },

    /// A known tag without a codec in this crate.
    #[error("unsupported transaction type {0:#04x}")]
    UnsupportedTxType(u8),

    #[error("unknown transaction type {0:#04x}")]
    UnknownTxType(u8),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A value required for encoding or signing is unset.
    #[error("{0} is not defined")]
    MissingField(&'static str),

    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),

    /// `input` and `data` are aliases; only one may be given.
    #[error("input and data are both defined; use only one")]
    InputAndData,

    #[error("input is missing; define input or data")]
    MissingInput,

    /// Keyring address does not match the transaction's sender or fee payer.
    #[error("{role} address {actual} does not match keyring address {expected}")]
    AddressMismatch {
        role: &'static str,
        expected: Address,
        actual: Address,
    },

    /// Raw transactions being combined differ in more than their signatures.
    #[error("transactions being combined differ in {0}")]
    CombineMismatch(&'static str),
}

impl TxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TxError::Primitive(err) => err.kind(),
            TxError::Keyring(err) => err.kind(),
            TxError::InputAndData | TxError::AddressMismatch { .. } => ErrorKind::PolicyViolation,
            TxError::Rlp(_)
            | TxError::EmptyInput
            | TxError::TypeTagMismatch { .. }
            | TxError::UnsupportedTxType(_)
            | TxError::UnknownTxType(_)
            | TxError::InvalidField { .. }
            | TxError::MissingField(_)
            | TxError::TrailingBytes(_)
            | TxError::MissingInput
            | TxError::CombineMismatch(_) => ErrorKind::MalformedInput,
        }
    }
}

pub type TxResult<T> = Result<T, TxError>;
