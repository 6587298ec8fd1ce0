//! Public key and signer recovery for produced signatures.

use alloy_primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use klay_primitives::{hash_message, SignatureData};

use crate::error::{KeyringError, KeyringResult};
use crate::private_key::{address_from_verifying_key, public_key_hex};

/// Extracts the recovery id from `v`.
///
/// With a chain id, `v` must be `recid + chainId * 2 + 35`. Without one, both the
/// `recid + 27` message form and a bare `0`/`1` are accepted.
pub fn recovery_id(v: u64, chain_id: Option<u64>) -> KeyringResult<RecoveryId> {
    let raw = match chain_id {
        Some(chain_id) => {
            let offset = chain_id
                .checked_mul(2)
                .and_then(|doubled| doubled.checked_add(35))
                .ok_or(KeyringError::ChainIdOverflow(chain_id))?;
            v.checked_sub(offset)
        }
        None if v >= 27 => v.checked_sub(27),
        None => Some(v),
    };
    raw.and_then(|raw| u8::try_from(raw).ok())
        .filter(|raw| *raw <= 1)
        .and_then(RecoveryId::from_byte)
        .ok_or(KeyringError::InvalidRecoveryId(v))
}

/// Recovers the verifying key that produced `signature` over `digest`.
pub fn recover_verifying_key(
    digest: B256,
    signature: &SignatureData,
    chain_id: Option<u64>,
) -> KeyringResult<VerifyingKey> {
    let recovery_id = recovery_id(signature.v, chain_id)?;
    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r.to_be_bytes::<32>());
    compact[32..].copy_from_slice(&signature.s.to_be_bytes::<32>());
    let signature =
        Signature::from_slice(&compact).map_err(|e| KeyringError::Recovery(e.to_string()))?;
    VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)
        .map_err(|e| KeyringError::Recovery(e.to_string()))
}

/// Recovers the uncompressed public key (`x ++ y` hex) that produced `signature`.
pub fn recover_public_key(
    digest: B256,
    signature: &SignatureData,
    chain_id: Option<u64>,
) -> KeyringResult<String> {
    let key = recover_verifying_key(digest, signature, chain_id)?;
    Ok(public_key_hex(&key, false))
}

/// Recovers the signer address of a message signature.
///
/// When `is_hashed` is false `message` is framed with [`hash_message`] first;
/// otherwise it must already be the 32-byte message hash.
pub fn recover_message(
    message: &[u8],
    signature: &SignatureData,
    is_hashed: bool,
) -> KeyringResult<Address> {
    let digest = if is_hashed {
        if message.len() != 32 {
            return Err(KeyringError::Recovery(format!(
                "hashed message must be 32 bytes, got {}",
                message.len()
            )));
        }
        B256::from_slice(message)
    } else {
        hash_message(message)
    };
    let key = recover_verifying_key(digest, signature, None)?;
    Ok(address_from_verifying_key(&key))
}
