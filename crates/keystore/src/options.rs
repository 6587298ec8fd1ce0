//! Encryption options.

use crate::crypto::Cipher;
use crate::kdf::KdfOptions;

pub const SALT_LEN: usize = 32;
pub const IV_LEN: usize = 16;

/// Settings for [`KeystoreCodec::encrypt`](crate::KeystoreCodec::encrypt).
///
/// `salt`, `iv` and `id` are drawn at random when unset. When set they are used
/// verbatim for every key, which is only meant for reproducible tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptOptions {
    pub kdf: KdfOptions,
    pub cipher: Cipher,
    pub salt: Option<Vec<u8>>,
    pub iv: Option<[u8; IV_LEN]>,
    pub id: Option<String>,
    /// Address for bare multiple or role-based key material.
    pub address: Option<String>,
}

impl EncryptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kdf(mut self, kdf: KdfOptions) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn with_cipher(mut self, cipher: Cipher) -> Self {
        self.cipher = cipher;
        self
    }

    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    pub fn with_iv(mut self, iv: [u8; IV_LEN]) -> Self {
        self.iv = Some(iv);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}
