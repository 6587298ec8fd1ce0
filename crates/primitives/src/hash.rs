//! Domain-separated hashing.

pub use alloy_primitives::keccak256;
use alloy_primitives::B256;

/// Prefix framing signed messages so they can never collide with a transaction
/// signing payload, which always starts with an RLP list header.
pub const MESSAGE_PREFIX: &str = "\x19Klaytn Signed Message:\n";

/// keccak256(`MESSAGE_PREFIX ++ len(message) ++ message`).
pub fn hash_message(message: &[u8]) -> B256 {
    let mut preimage = Vec::with_capacity(MESSAGE_PREFIX.len() + 20 + message.len());
    preimage.extend_from_slice(MESSAGE_PREFIX.as_bytes());
    preimage.extend_from_slice(message.len().to_string().as_bytes());
    preimage.extend_from_slice(message);
    keccak256(&preimage)
}
