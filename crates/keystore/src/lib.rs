//! Password-encrypted keystores for role-based keyrings.
//!
//! - v3 holds exactly one key in a `crypto` object
//! - v4 holds a `keyring`: a flat list of crypto objects, or one list per role
//!
//! Each key is derived with scrypt or pbkdf2, enciphered with AES-128 (CTR or CBC)
//! and authenticated with `keccak256(derivedKey[16..32] ++ ciphertext)`.

pub mod codec;
pub mod crypto;
pub mod error;
pub mod format;
pub mod kdf;
pub mod options;

pub use codec::{KeySource, KeystoreCodec};
pub use crypto::{Cipher, CryptoPrimitives, RustCrypto};
pub use error::{KeystoreError, KeystoreResult};
pub use format::{
    CipherParams, CryptoJson, KdfParams, KeyringJson, KeystoreRecord, KeystoreV3, KeystoreV4,
    VERSION_3, VERSION_4,
};
pub use kdf::KdfOptions;
pub use options::EncryptOptions;
