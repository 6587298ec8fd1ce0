//! secp256k1 private key.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{keccak256, Address, B256, U256};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use klay_primitives::{strip_hex_prefix, to_hex, SignatureData};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{KeyringError, KeyringResult};

const MAX_ENTROPY_ATTEMPTS: usize = 16;

/// An immutable secp256k1 scalar.
///
/// Equality compares the scalar. `Debug` prints the derived address only.
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Builds a key from its 32 big-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> KeyringResult<Self> {
        if bytes.len() != 32 {
            return Err(KeyringError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|_| KeyringError::InvalidPrivateKey("scalar out of range".to_string()))?;
        Ok(Self { signing_key })
    }

    /// Draws a fresh key from the OS RNG.
    ///
    /// With `entropy`, the key is keccak256 of 32 random bytes followed by the entropy.
    pub fn generate(entropy: Option<&[u8]>) -> Self {
        if let Some(entropy) = entropy {
            for _ in 0..MAX_ENTROPY_ATTEMPTS {
                let mut seed = Vec::with_capacity(32 + entropy.len());
                let mut random = [0u8; 32];
                OsRng.fill_bytes(&mut random);
                seed.extend_from_slice(&random);
                seed.extend_from_slice(entropy);
                if let Ok(key) = Self::from_bytes(keccak256(&seed).as_slice()) {
                    return key;
                }
            }
        }
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// The 32 scalar bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }

    /// Scalar as `0x`-prefixed hex.
    pub fn to_hex(&self) -> String {
        to_hex(self.to_bytes())
    }

    /// Public key as hex: 64 bytes `x ++ y` when uncompressed, 33 bytes SEC1 when compressed.
    pub fn public_key(&self, compressed: bool) -> String {
        public_key_hex(self.signing_key.verifying_key(), compressed)
    }

    /// Address derived from the public key.
    pub fn derived_address(&self) -> Address {
        address_from_verifying_key(self.signing_key.verifying_key())
    }

    /// Signs a transaction digest, binding `chain_id` into `v`.
    pub fn sign(&self, digest: B256, chain_id: u64) -> KeyringResult<SignatureData> {
        let offset = chain_id
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(35))
            .ok_or(KeyringError::ChainIdOverflow(chain_id))?;
        self.sign_with_v_offset(digest, offset)
    }

    /// Signs an already framed message hash; `v` is `recid + 27`.
    pub fn sign_message_hash(&self, message_hash: B256) -> KeyringResult<SignatureData> {
        self.sign_with_v_offset(message_hash, 27)
    }

    fn sign_with_v_offset(&self, digest: B256, offset: u64) -> KeyringResult<SignatureData> {
        let (signature, recovery_id): (Signature, RecoveryId) = self
            .signing_key
            .sign_prehash_recoverable(digest.as_slice())
            .map_err(|e| KeyringError::Signing(e.to_string()))?;
        let v = offset
            .checked_add(u64::from(recovery_id.to_byte()))
            .ok_or(KeyringError::ChainIdOverflow(offset))?;
        let r = U256::from_be_slice(&signature.r().to_bytes());
        let s = U256::from_be_slice(&signature.s().to_bytes());
        Ok(SignatureData::new(v, r, s))
    }
}

impl FromStr for PrivateKey {
    type Err = KeyringError;

    /// Parses `0x`-optional 64-character hex. Wallet keys are rejected.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if split_klaytn_wallet_key(value).is_some() {
            return Err(KeyringError::WalletKeyFormat);
        }
        let digits = strip_hex_prefix(value);
        if digits.len() != 64 {
            return Err(KeyringError::InvalidPrivateKey(format!(
                "expected 64 hex characters, got {}",
                digits.len()
            )));
        }
        let bytes = hex::decode(digits)
            .map_err(|_| KeyringError::InvalidPrivateKey("not hex".to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("address", &self.derived_address())
            .finish_non_exhaustive()
    }
}

/// Splits `privateKey ++ 0x00 ++ address` into its key and address parts.
///
/// The leading `0x` on the key part is optional.
pub fn split_klaytn_wallet_key(value: &str) -> Option<(&str, &str)> {
    let body = strip_hex_prefix(value);
    let mut parts = body.split("0x");
    let key = parts.next()?;
    let kind = parts.next()?;
    let address = parts.next()?;
    if parts.next().is_some() || kind != "00" {
        return None;
    }
    let is_hex = |s: &str, len: usize| s.len() == len && s.chars().all(|c| c.is_ascii_hexdigit());
    if !is_hex(key, 64) || !is_hex(address, 40) {
        return None;
    }
    Some((key, address))
}

pub(crate) fn public_key_hex(key: &VerifyingKey, compressed: bool) -> String {
    let point = key.to_encoded_point(compressed);
    if compressed {
        to_hex(point.as_bytes())
    } else {
        to_hex(point.as_bytes().get(1..).unwrap_or_default())
    }
}

pub(crate) fn address_from_verifying_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(point.as_bytes().get(1..).unwrap_or_default());
    Address::from_slice(hash.as_slice().get(12..).unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // Well-known development key: 0x4646...46 controls 0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f.
    const KEY: &str = "0x4646464646464646464646464646464646464646464646464646464646464646";
    const ADDRESS: &str = "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f";

    #[test]
    fn test_parse_and_derive_address() {
        let key: PrivateKey = KEY.parse().unwrap();
        assert_eq!(key.to_hex(), KEY);
        assert_eq!(klay_primitives::address_to_hex(&key.derived_address()), ADDRESS);

        let unprefixed: PrivateKey = KEY.trim_start_matches("0x").parse().unwrap();
        assert_eq!(unprefixed, key);
    }

    #[test]
    fn test_rejects_malformed_keys() {
        assert!("0x1234".parse::<PrivateKey>().is_err());
        assert!(format!("0x{}", "00".repeat(32)).parse::<PrivateKey>().is_err());
        assert!(format!("0x{}", "zz".repeat(32)).parse::<PrivateKey>().is_err());
    }

    #[test]
    fn test_rejects_wallet_key_format() {
        let wallet_key = format!("{KEY}0x00{}", ADDRESS);
        assert_eq!(
            wallet_key.parse::<PrivateKey>().unwrap_err(),
            KeyringError::WalletKeyFormat
        );
    }

    #[test]
    fn test_public_key_shapes() {
        let key: PrivateKey = KEY.parse().unwrap();
        assert_eq!(key.public_key(false).len(), 2 + 128);
        let compressed = key.public_key(true);
        assert_eq!(compressed.len(), 2 + 66);
        assert!(compressed.starts_with("0x02") || compressed.starts_with("0x03"));
    }

    #[test]
    fn test_sign_binds_chain_id_into_v() {
        let key: PrivateKey = KEY.parse().unwrap();
        let digest = keccak256(b"digest");

        let sig = key.sign(digest, 1001).unwrap();
        assert!(sig.v == 1001 * 2 + 35 || sig.v == 1001 * 2 + 36);

        let again = key.sign(digest, 1001).unwrap();
        assert_eq!(sig, again, "RFC6979 signing is deterministic");
    }

    #[test]
    fn test_sign_rejects_overflowing_chain_id() {
        let key: PrivateKey = KEY.parse().unwrap();
        let err = key.sign(B256::ZERO, u64::MAX).unwrap_err();
        assert_eq!(err, KeyringError::ChainIdOverflow(u64::MAX));
    }

    #[test]
    fn test_generate_produces_distinct_keys() {
        let a = PrivateKey::generate(None);
        let b = PrivateKey::generate(Some(b"extra entropy"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_does_not_leak_scalar() {
        let key: PrivateKey = KEY.parse().unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("4646464646"));
    }
}
