//! Shared value types for the Klaytn signing and serialization core.
//!
//! - [`Role`]: the three fixed key slots of a keyring
//! - [`SignatureData`]: `(v, r, s)` triple with its hex and RLP forms
//! - [`encoding`]: the validated parsers that turn text into typed values
//! - [`hash_message`]: domain-separated message hashing
//! - [`ErrorKind`]: the error taxonomy every crate in the workspace reports

pub mod encoding;
pub mod error;
pub mod hash;
pub mod role;
pub mod signature;

pub use alloy_primitives::{Address, Bytes, B256, U256};
pub use encoding::{
    address_to_hex, is_hex_strict, parse_address, parse_digest, parse_hex_bytes, strip_hex_prefix,
    to_hex, trim_leading_zeros,
};
pub use error::{ErrorKind, PrimitiveError, PrimitiveResult};
pub use hash::{hash_message, keccak256, MESSAGE_PREFIX};
pub use role::{Role, MAXIMUM_KEY_NUM, ROLE_LAST};
pub use signature::SignatureData;
