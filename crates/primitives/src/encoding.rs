//! Validated parsing of addresses, digests and hex payloads.
//!
//! These are the only places string input becomes a typed value; everything
//! downstream holds an [`Address`], [`B256`] or [`Bytes`] and never re-checks.

use alloy_primitives::{Address, Bytes, B256};

use crate::error::{PrimitiveError, PrimitiveResult};

/// Strips a `0x`/`0X` prefix if present.
pub fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Returns true if `value` is `0x`-prefixed and the rest is hex (possibly empty).
pub fn is_hex_strict(value: &str) -> bool {
    let Some(digits) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    else {
        return false;
    };
    digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parses a 20-byte address. The `0x` prefix is optional and case is ignored.
pub fn parse_address(value: &str) -> PrimitiveResult<Address> {
    let digits = strip_hex_prefix(value.trim());
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PrimitiveError::InvalidAddress(value.to_string()));
    }
    let bytes = hex::decode(digits).map_err(|_| PrimitiveError::InvalidAddress(value.to_string()))?;
    Ok(Address::from_slice(&bytes))
}

/// Canonical lower-case `0x`-prefixed address text.
pub fn address_to_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

/// Parses a 32-byte digest. Requires `0x` followed by exactly 64 hex characters.
pub fn parse_digest(value: &str) -> PrimitiveResult<B256> {
    if !is_hex_strict(value) || value.len() != 66 {
        return Err(PrimitiveError::InvalidDigest(value.to_string()));
    }
    let bytes = hex::decode(strip_hex_prefix(value))
        .map_err(|_| PrimitiveError::InvalidDigest(value.to_string()))?;
    Ok(B256::from_slice(&bytes))
}

/// Parses `0x`-prefixed hex of even length into bytes.
pub fn parse_hex_bytes(value: &str) -> PrimitiveResult<Bytes> {
    if !is_hex_strict(value) {
        return Err(PrimitiveError::InvalidHex(value.to_string()));
    }
    hex::decode(strip_hex_prefix(value))
        .map(Bytes::from)
        .map_err(|_| PrimitiveError::InvalidHex(value.to_string()))
}

/// Lower-case `0x`-prefixed hex of `bytes`.
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes.as_ref()))
}

/// Drops leading zero bytes, the canonical form of an RLP integer.
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes.get(first..).unwrap_or_default()
}
