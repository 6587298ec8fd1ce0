//! Shared error taxonomy and primitive parsing errors.

use thiserror::Error;

/// Classification shared by every error type in the workspace.
///
/// Callers branch on the kind rather than on individual variants, e.g. to
/// re-prompt for a password on [`ErrorKind::Authentication`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad address, hex, digest or key shape; wrong arity; tag mismatch.
    MalformedInput,
    /// Keystore MAC mismatch, most likely a wrong password.
    Authentication,
    /// Unknown KDF, PRF or cipher.
    UnsupportedAlgorithm,
    /// Input is well formed but the operation is not allowed for it.
    PolicyViolation,
}

/// Errors produced while parsing primitive values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Address is not 20 bytes of hex.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Digest is not `0x` followed by exactly 64 hex characters.
    #[error("invalid 32-byte digest: {0}")]
    InvalidDigest(String),

    /// Value is not `0x`-prefixed hex.
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// Role index outside `0..ROLE_LAST`.
    #[error("unknown role index {0}")]
    UnknownRole(usize),

    /// Signature component does not fit its integer type.
    #[error("signature component {0} is out of range")]
    SignatureComponentOutOfRange(&'static str),
}

impl PrimitiveError {
    /// All primitive parsing failures are malformed input.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedInput
    }
}

/// Result type for primitive parsing.
pub type PrimitiveResult<T> = Result<T, PrimitiveError>;
