//! `(v, r, s)` signature triple.

use alloy_primitives::U256;
use alloy_rlp::{BufMut, Encodable, Header};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoding::{strip_hex_prefix, trim_leading_zeros};
use crate::error::{PrimitiveError, PrimitiveResult};

/// A recoverable secp256k1 signature in the chain's `(v, r, s)` form.
///
/// `v` already carries the replay-protection component: `recid + chainId * 2 + 35`
/// for transaction signatures and `recid + 27` for message signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureData {
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

impl SignatureData {
    /// The placeholder signature `(0x01, 0x, 0x)` used for unsigned transactions.
    pub const EMPTY: SignatureData = SignatureData {
        v: 1,
        r: U256::ZERO,
        s: U256::ZERO,
    };

    pub const fn new(v: u64, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// True for the unsigned placeholder.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Builds a signature from big-endian components, ignoring any leading zero bytes.
    pub fn from_be_components(v: &[u8], r: &[u8], s: &[u8]) -> PrimitiveResult<Self> {
        let v = trim_leading_zeros(v);
        let r = trim_leading_zeros(r);
        let s = trim_leading_zeros(s);
        if v.len() > 8 {
            return Err(PrimitiveError::SignatureComponentOutOfRange("v"));
        }
        if r.len() > 32 {
            return Err(PrimitiveError::SignatureComponentOutOfRange("r"));
        }
        if s.len() > 32 {
            return Err(PrimitiveError::SignatureComponentOutOfRange("s"));
        }
        let mut v_bytes = [0u8; 8];
        v_bytes[8 - v.len()..].copy_from_slice(v);
        Ok(Self {
            v: u64::from_be_bytes(v_bytes),
            r: U256::from_be_slice(r),
            s: U256::from_be_slice(s),
        })
    }

    /// Hex triple with leading zeros trimmed, e.g. `["0x07f6", "0x1a..", "0x5b.."]`.
    pub fn to_hex_triple(&self) -> [String; 3] {
        [
            int_hex(&self.v.to_be_bytes()),
            int_hex(&self.r.to_be_bytes::<32>()),
            int_hex(&self.s.to_be_bytes::<32>()),
        ]
    }

    /// Parses a hex triple. Each component may omit the prefix or have odd length.
    pub fn from_hex_triple<S: AsRef<str>>(triple: &[S; 3]) -> PrimitiveResult<Self> {
        let [v, r, s] = triple;
        let v = component_bytes(v.as_ref())?;
        let r = component_bytes(r.as_ref())?;
        let s = component_bytes(s.as_ref())?;
        Self::from_be_components(&v, &r, &s)
    }

    fn payload_length(&self) -> usize {
        self.v.length() + self.r.length() + self.s.length()
    }
}

impl Default for SignatureData {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Encodable for SignatureData {
    fn encode(&self, out: &mut dyn BufMut) {
        Header {
            list: true,
            payload_length: self.payload_length(),
        }
        .encode(out);
        self.v.encode(out);
        self.r.encode(out);
        self.s.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        payload_length + alloy_rlp::length_of_length(payload_length)
    }
}

impl Serialize for SignatureData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_hex_triple().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SignatureData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let triple = <[String; 3]>::deserialize(deserializer)?;
        Self::from_hex_triple(&triple).map_err(serde::de::Error::custom)
    }
}

fn int_hex(be: &[u8]) -> String {
    format!("0x{}", hex::encode(trim_leading_zeros(be)))
}

fn component_bytes(value: &str) -> PrimitiveResult<Vec<u8>> {
    let digits = strip_hex_prefix(value);
    let padded;
    let digits = if digits.len() % 2 == 1 {
        padded = format!("0{digits}");
        padded.as_str()
    } else {
        digits
    };
    hex::decode(digits).map_err(|_| PrimitiveError::InvalidHex(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_signature_hex_and_rlp() {
        let empty = SignatureData::EMPTY;
        assert!(empty.is_empty());
        assert_eq!(empty.to_hex_triple(), ["0x01", "0x", "0x"]);
        // [0x01, "", ""]
        assert_eq!(alloy_rlp::encode(empty), vec![0xc3, 0x01, 0x80, 0x80]);
    }

    #[test]
    fn test_from_be_components_strips_padding() {
        let padded = SignatureData::from_be_components(&[0, 0, 0x07, 0xf6], &[0, 1], &[2]).unwrap();
        assert_eq!(padded, SignatureData::new(0x07f6, U256::from(1), U256::from(2)));
    }

    #[test]
    fn test_from_be_components_rejects_oversized_v() {
        let err = SignatureData::from_be_components(&[1; 9], &[1], &[1]).unwrap_err();
        assert_eq!(err, PrimitiveError::SignatureComponentOutOfRange("v"));
    }

    #[test]
    fn test_hex_triple_serde() {
        let sig = SignatureData::new(0x0fe9, U256::from(0xabcdu64), U256::from(0x1u64));
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, r#"["0x0fe9","0xabcd","0x01"]"#);

        let back: SignatureData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);

        // odd-length and unprefixed components are accepted
        let loose: SignatureData = serde_json::from_str(r#"["fe9","0xabcd","1"]"#).unwrap();
        assert_eq!(loose, sig);
    }
}
