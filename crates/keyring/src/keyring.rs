//! Role-partitioned keyring.

use alloy_primitives::{Address, Bytes, B256};
use klay_primitives::{address_to_hex, hash_message, parse_address, Role, SignatureData, ROLE_LAST};
use tracing::debug;

use crate::error::{KeyringError, KeyringResult};
use crate::material::{check_key_count, KeyMaterial};
use crate::private_key::{split_klaytn_wallet_key, PrivateKey};

/// Shape of a keyring, derived from its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyringKind {
    /// Exactly one key, in `TransactionKey`.
    Single,
    /// Zero or several keys, all in `TransactionKey`.
    Multiple,
    /// At least one key outside `TransactionKey`.
    RoleBased,
}

/// Result of [`Keyring::sign_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    pub message_hash: B256,
    pub signature: SignatureData,
    pub message: Bytes,
}

/// An address bound to one list of private keys per [`Role`].
///
/// Reading a role whose list is empty falls back to `TransactionKey`; see
/// [`Keyring::get_key_by_role`]. The fallback never applies to writes or to
/// keystore encryption, which always see the raw lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyring {
    address: Address,
    keys: [Vec<PrivateKey>; ROLE_LAST],
}

impl Keyring {
    /// Builds a keyring from an address and any accepted key material shape.
    pub fn create(address: &str, material: impl Into<KeyMaterial>) -> KeyringResult<Self> {
        let address = parse_address(address)?;
        Self::from_parts(address, material.into().into_role_lists()?)
    }

    /// Builds a keyring from an already validated address and role lists.
    pub fn from_parts(address: Address, keys: [Vec<PrivateKey>; ROLE_LAST]) -> KeyringResult<Self> {
        for (role, list) in Role::ALL.into_iter().zip(keys.iter()) {
            check_key_count(role, list.len())?;
        }
        Ok(Self { address, keys })
    }

    /// Single-key keyring. Wallet-key input is rejected; it carries its own address.
    pub fn create_with_single_key(address: &str, key: &str) -> KeyringResult<Self> {
        Self::create(address, KeyMaterial::single_hex(key)?)
    }

    /// Multi-key keyring with every key in `TransactionKey`.
    pub fn create_with_multiple_key<S: AsRef<str>>(address: &str, keys: &[S]) -> KeyringResult<Self> {
        Self::create(address, KeyMaterial::multiple_hex(keys)?)
    }

    /// Role-based keyring from per-role key lists.
    pub fn create_with_role_based_key<S: AsRef<str>>(
        address: &str,
        roles: &[Vec<S>],
    ) -> KeyringResult<Self> {
        Self::create(address, KeyMaterial::role_based_hex(roles)?)
    }

    /// Single-key keyring whose address is derived from the key.
    ///
    /// Also accepts a wallet key, in which case the embedded address is used.
    pub fn create_from_private_key(key: &str) -> KeyringResult<Self> {
        if split_klaytn_wallet_key(key).is_some() {
            return Self::create_from_klaytn_wallet_key(key);
        }
        let key: PrivateKey = key.parse()?;
        let address = key.derived_address();
        Self::from_parts(address, [vec![key], Vec::new(), Vec::new()])
    }

    /// Unwraps `privateKey ++ 0x00 ++ address` into a single-key keyring.
    pub fn create_from_klaytn_wallet_key(wallet_key: &str) -> KeyringResult<Self> {
        let (key, address) = split_klaytn_wallet_key(wallet_key)
            .ok_or_else(|| KeyringError::InvalidWalletKey(wallet_key.to_string()))?;
        let key: PrivateKey = key.parse()?;
        Self::from_parts(parse_address(address)?, [vec![key], Vec::new(), Vec::new()])
    }

    /// Fresh single-key keyring.
    pub fn generate(entropy: Option<&[u8]>) -> Self {
        let key = PrivateKey::generate(entropy);
        Self {
            address: key.derived_address(),
            keys: [vec![key], Vec::new(), Vec::new()],
        }
    }

    /// Fresh private key as hex.
    pub fn generate_single_key(entropy: Option<&[u8]>) -> String {
        PrivateKey::generate(entropy).to_hex()
    }

    /// `count` fresh private keys as hex.
    pub fn generate_multiple_keys(count: usize, entropy: Option<&[u8]>) -> Vec<String> {
        (0..count)
            .map(|_| Self::generate_single_key(entropy))
            .collect()
    }

    /// Fresh per-role private keys as hex, `counts[i]` keys for role `i`.
    pub fn generate_role_based_keys(
        counts: [usize; ROLE_LAST],
        entropy: Option<&[u8]>,
    ) -> Vec<Vec<String>> {
        counts
            .into_iter()
            .map(|count| Self::generate_multiple_keys(count, entropy))
            .collect()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Lower-case `0x`-prefixed address.
    pub fn address_hex(&self) -> String {
        address_to_hex(&self.address)
    }

    /// The raw per-role lists, without fallback.
    pub fn keys(&self) -> &[Vec<PrivateKey>; ROLE_LAST] {
        &self.keys
    }

    /// The raw list for `role`, without fallback.
    pub fn role_keys(&self, role: Role) -> &[PrivateKey] {
        self.keys.get(role.index()).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replaces the list for `role`.
    pub fn set_role_keys(&mut self, role: Role, keys: Vec<PrivateKey>) -> KeyringResult<()> {
        check_key_count(role, keys.len())?;
        if let Some(slot) = self.keys.get_mut(role.index()) {
            *slot = keys;
        }
        Ok(())
    }

    pub fn kind(&self) -> KeyringKind {
        let [transaction, update, fee_payer] = &self.keys;
        if !update.is_empty() || !fee_payer.is_empty() {
            KeyringKind::RoleBased
        } else if transaction.len() == 1 {
            KeyringKind::Single
        } else {
            KeyringKind::Multiple
        }
    }

    /// Keys used to sign for `role`.
    ///
    /// An empty role falls back to `TransactionKey`; if that is empty too the read fails.
    pub fn get_key_by_role(&self, role: Role) -> KeyringResult<&[PrivateKey]> {
        let keys = self.role_keys(role);
        if !keys.is_empty() {
            return Ok(keys);
        }
        if role != Role::TransactionKey {
            let fallback = self.role_keys(Role::TransactionKey);
            if !fallback.is_empty() {
                return Ok(fallback);
            }
        }
        Err(KeyringError::EmptyRole(role))
    }

    /// Public keys per role, in slot order.
    pub fn public_keys(&self, compressed: bool) -> Vec<Vec<String>> {
        self.keys
            .iter()
            .map(|keys| keys.iter().map(|key| key.public_key(compressed)).collect())
            .collect()
    }

    /// Signs `digest` with the key at `index` of the resolved `role` list.
    pub fn sign_with_key(
        &self,
        digest: B256,
        chain_id: u64,
        role: Role,
        index: usize,
    ) -> KeyringResult<SignatureData> {
        let keys = self.get_key_by_role(role)?;
        let key = keys.get(index).ok_or(KeyringError::IndexOutOfRange {
            role,
            index,
            len: keys.len(),
        })?;
        debug!(%role, index, chain_id, "signing digest with single key");
        key.sign(digest, chain_id)
    }

    /// Signs `digest` with every key of the resolved `role` list, preserving list order.
    pub fn sign_with_keys(
        &self,
        digest: B256,
        chain_id: u64,
        role: Role,
    ) -> KeyringResult<Vec<SignatureData>> {
        let keys = self.get_key_by_role(role)?;
        debug!(%role, keys = keys.len(), chain_id, "signing digest with role keys");
        keys.iter().map(|key| key.sign(digest, chain_id)).collect()
    }

    /// Signs a message under the message-hashing scheme.
    ///
    /// `role` and `index` go together; omitting both signs with `TransactionKey[0]`.
    pub fn sign_message(
        &self,
        message: &[u8],
        role: Option<Role>,
        index: Option<usize>,
    ) -> KeyringResult<SignedMessage> {
        let (role, index) = match (role, index) {
            (Some(role), Some(index)) => (role, index),
            (None, None) => (Role::TransactionKey, 0),
            _ => return Err(KeyringError::RoleIndexPairing),
        };
        let keys = self.get_key_by_role(role)?;
        let key = keys.get(index).ok_or(KeyringError::IndexOutOfRange {
            role,
            index,
            len: keys.len(),
        })?;
        let message_hash = hash_message(message);
        let signature = key.sign_message_hash(message_hash)?;
        Ok(SignedMessage {
            message_hash,
            signature,
            message: Bytes::copy_from_slice(message),
        })
    }

    /// True when the address is not simply the address of the single key held.
    pub fn is_decoupled(&self) -> bool {
        if self.kind() != KeyringKind::Single {
            return true;
        }
        self.role_keys(Role::TransactionKey)
            .first()
            .map_or(true, |key| key.derived_address() != self.address)
    }

    /// Exports `privateKey ++ 0x00 ++ address`.
    pub fn klaytn_wallet_key(&self) -> KeyringResult<String> {
        let [transaction, update, fee_payer] = &self.keys;
        match transaction.as_slice() {
            [key] if update.is_empty() && fee_payer.is_empty() => {
                Ok(format!("{}0x00{}", key.to_hex(), self.address_hex()))
            }
            _ => Err(KeyringError::WalletKeyExport),
        }
    }
}
