//! Cryptographic primitives used by the keystore codec.
//!
//! [`KeystoreCodec`](crate::KeystoreCodec) never calls a cipher, KDF or RNG
//! directly; it goes through [`CryptoPrimitives`], so a platform can supply its
//! own backend and tests can make randomness deterministic.

use std::fmt;
use std::str::FromStr;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use alloy_primitives::{keccak256, B256};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::error::{KeystoreError, KeystoreResult};

type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;
type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Symmetric ciphers a keystore entry can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cipher {
    #[default]
    Aes128Ctr,
    /// PKCS#7 padded.
    Aes128Cbc,
}

impl Cipher {
    pub const fn name(self) -> &'static str {
        match self {
            Cipher::Aes128Ctr => "aes-128-ctr",
            Cipher::Aes128Cbc => "aes-128-cbc",
        }
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cipher {
    type Err = KeystoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "aes-128-ctr" => Ok(Cipher::Aes128Ctr),
            "aes-128-cbc" => Ok(Cipher::Aes128Cbc),
            _ => Err(KeystoreError::UnsupportedCipher(value.to_string())),
        }
    }
}

/// Hash, key derivation, block cipher and randomness backend.
pub trait CryptoPrimitives: Send + Sync {
    fn keccak256(&self, data: &[u8]) -> B256;

    /// scrypt with cost `2^log_n`, writing `out.len()` bytes.
    fn scrypt(&self, password: &[u8], salt: &[u8], log_n: u8, r: u32, p: u32, out: &mut [u8])
        -> KeystoreResult<()>;

    /// PBKDF2 with HMAC-SHA256, writing `out.len()` bytes.
    fn pbkdf2_sha256(&self, password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]);

    fn encrypt(&self, cipher: Cipher, key: &[u8], iv: &[u8], plaintext: &[u8]) -> KeystoreResult<Vec<u8>>;

    fn decrypt(&self, cipher: Cipher, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> KeystoreResult<Vec<u8>>;

    /// Fills `buf` from a cryptographically secure source.
    fn fill_random(&self, buf: &mut [u8]);
}

/// [`CryptoPrimitives`] backed by the RustCrypto crates and the OS RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCrypto;

// scrypt's own output-length hint; the real length comes from the output buffer.
const SCRYPT_PARAMS_LEN: usize = 32;

impl CryptoPrimitives for RustCrypto {
    fn keccak256(&self, data: &[u8]) -> B256 {
        keccak256(data)
    }

    fn scrypt(
        &self,
        password: &[u8],
        salt: &[u8],
        log_n: u8,
        r: u32,
        p: u32,
        out: &mut [u8],
    ) -> KeystoreResult<()> {
        let params = scrypt::Params::new(log_n, r, p, SCRYPT_PARAMS_LEN)
            .map_err(|e| KeystoreError::InvalidKdfParams(e.to_string()))?;
        scrypt::scrypt(password, salt, &params, out)
            .map_err(|e| KeystoreError::InvalidKdfParams(e.to_string()))
    }

    fn pbkdf2_sha256(&self, password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
        pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, rounds, out);
    }

    fn encrypt(&self, cipher: Cipher, key: &[u8], iv: &[u8], plaintext: &[u8]) -> KeystoreResult<Vec<u8>> {
        match cipher {
            Cipher::Aes128Ctr => {
                let mut buffer = plaintext.to_vec();
                Aes128Ctr::new_from_slices(key, iv)
                    .map_err(|e| KeystoreError::InvalidCipherParams(e.to_string()))?
                    .apply_keystream(&mut buffer);
                Ok(buffer)
            }
            Cipher::Aes128Cbc => Ok(Aes128CbcEnc::new_from_slices(key, iv)
                .map_err(|e| KeystoreError::InvalidCipherParams(e.to_string()))?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        }
    }

    fn decrypt(&self, cipher: Cipher, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> KeystoreResult<Vec<u8>> {
        match cipher {
            // CTR is its own inverse
            Cipher::Aes128Ctr => self.encrypt(cipher, key, iv, ciphertext),
            Cipher::Aes128Cbc => Aes128CbcDec::new_from_slices(key, iv)
                .map_err(|e| KeystoreError::InvalidCipherParams(e.to_string()))?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|e| KeystoreError::Cipher(e.to_string())),
        }
    }

    fn fill_random(&self, buf: &mut [u8]) {
        OsRng.fill_bytes(buf);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cipher_names() {
        assert_eq!("aes-128-ctr".parse::<Cipher>().unwrap(), Cipher::Aes128Ctr);
        assert_eq!("AES-128-CBC".parse::<Cipher>().unwrap(), Cipher::Aes128Cbc);
        assert!(matches!(
            "aes-256-gcm".parse::<Cipher>().unwrap_err(),
            KeystoreError::UnsupportedCipher(name) if name == "aes-256-gcm"
        ));
        assert_eq!(Cipher::default().to_string(), "aes-128-ctr");
    }

    #[test]
    fn test_ciphers_invert() {
        let crypto = RustCrypto;
        let key = [7u8; 16];
        let iv = [9u8; 16];
        let plaintext = [0x42u8; 32];

        for cipher in [Cipher::Aes128Ctr, Cipher::Aes128Cbc] {
            let ciphertext = crypto.encrypt(cipher, &key, &iv, &plaintext).unwrap();
            assert_ne!(ciphertext.as_slice(), plaintext.as_slice());
            let decrypted = crypto.decrypt(cipher, &key, &iv, &ciphertext).unwrap();
            assert_eq!(decrypted, plaintext);
        }

        // 32 bytes pad to three blocks
        let cbc = crypto.encrypt(Cipher::Aes128Cbc, &key, &iv, &plaintext).unwrap();
        assert_eq!(cbc.len(), 48);
    }

    #[test]
    fn test_rejects_bad_iv_length() {
        let err = RustCrypto
            .encrypt(Cipher::Aes128Ctr, &[0u8; 16], &[0u8; 8], b"x")
            .unwrap_err();
        assert!(matches!(err, KeystoreError::InvalidCipherParams(_)));
    }

    #[test]
    fn test_pbkdf2_rfc7914_vector() {
        // RFC 7914 section 11, PBKDF2-HMAC-SHA256 with c = 1
        let mut out = [0u8; 64];
        RustCrypto.pbkdf2_sha256(b"passwd", b"salt", 1, &mut out);
        assert_eq!(
            hex::encode(&out[..16]),
            "55ac046e56e3089fec1691c22544b605"
        );
    }
}
