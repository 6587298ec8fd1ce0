//! Keyring to keystore encryption and back.

use klay_keyring::{KeyMaterial, Keyring, KeyringError, KeyringKind, PrivateKey};
use klay_primitives::{parse_address, strip_hex_prefix, Role, ROLE_LAST};
use tracing::{debug, trace};

use crate::crypto::{Cipher, CryptoPrimitives, RustCrypto};
use crate::error::{KeystoreError, KeystoreResult};
use crate::format::{
    CipherParams, CryptoJson, KeyringJson, KeystoreRecord, KeystoreV3, KeystoreV4, VERSION_3,
    VERSION_4,
};
use crate::kdf::KdfOptions;
use crate::options::{EncryptOptions, IV_LEN, SALT_LEN};

/// What to encrypt: a finished keyring or bare key material.
#[derive(Debug, Clone)]
pub enum KeySource {
    Keyring(Keyring),
    /// Single keys may omit the address; it is then derived from the key.
    Material(KeyMaterial),
}

impl From<Keyring> for KeySource {
    fn from(keyring: Keyring) -> Self {
        KeySource::Keyring(keyring)
    }
}

impl From<KeyMaterial> for KeySource {
    fn from(material: KeyMaterial) -> Self {
        KeySource::Material(material)
    }
}

impl From<PrivateKey> for KeySource {
    fn from(key: PrivateKey) -> Self {
        KeySource::Material(KeyMaterial::Single(key))
    }
}

/// Encrypts keyrings into v3/v4 keystores and decrypts them back.
///
/// Every key is encrypted independently with its own KDF run. Decryption checks
/// the MAC before deciphering, so a wrong password is always reported as
/// [`KeystoreError::WrongPassword`].
#[derive(Debug, Clone, Default)]
pub struct KeystoreCodec<C = RustCrypto> {
    crypto: C,
}

impl KeystoreCodec<RustCrypto> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: CryptoPrimitives> KeystoreCodec<C> {
    pub fn with_crypto(crypto: C) -> Self {
        Self { crypto }
    }

    pub fn crypto(&self) -> &C {
        &self.crypto
    }

    /// Encrypts into a v4 keystore.
    ///
    /// The `keyring` field is role-based when any role other than `TransactionKey`
    /// holds a key, and a flat list otherwise.
    pub fn encrypt(
        &self,
        source: impl Into<KeySource>,
        password: &str,
        options: &EncryptOptions,
    ) -> KeystoreResult<KeystoreV4> {
        let keyring = resolve_keyring(source.into(), options)?;

        let mut roles = Vec::with_capacity(ROLE_LAST);
        for role in Role::ALL {
            let encrypted = keyring
                .role_keys(role)
                .iter()
                .map(|key| self.encrypt_key(key, password, options))
                .collect::<KeystoreResult<Vec<_>>>()?;
            roles.push(encrypted);
        }

        let role_based = roles.iter().skip(1).any(|role| !role.is_empty());
        let keyring_json = if role_based {
            KeyringJson::RoleBased(roles)
        } else {
            KeyringJson::Flat(roles.into_iter().next().unwrap_or_default())
        };

        debug!(
            version = VERSION_4,
            kdf = options.kdf.name(),
            cipher = %options.cipher,
            keys = keyring_json.key_count(),
            role_based,
            "encrypted keystore"
        );
        Ok(KeystoreV4 {
            version: VERSION_4,
            id: self.keystore_id(options),
            address: keyring.address_hex(),
            keyring: keyring_json,
        })
    }

    /// Encrypts a single-key keyring into a v3 keystore.
    pub fn encrypt_v3(
        &self,
        source: impl Into<KeySource>,
        password: &str,
        options: &EncryptOptions,
    ) -> KeystoreResult<KeystoreV3> {
        let keyring = resolve_keyring(source.into(), options)?;
        let key = match (keyring.kind(), keyring.role_keys(Role::TransactionKey)) {
            (KeyringKind::Single, [key]) => key,
            _ => {
                let total = keyring.keys().iter().map(Vec::len).sum();
                return Err(KeystoreError::V3RequiresSingleKey(total));
            }
        };
        let crypto = self.encrypt_key(key, password, options)?;

        debug!(
            version = VERSION_3,
            kdf = options.kdf.name(),
            cipher = %options.cipher,
            "encrypted keystore"
        );
        Ok(KeystoreV3 {
            version: VERSION_3,
            id: self.keystore_id(options),
            address: keyring.address_hex(),
            crypto,
        })
    }

    /// Decrypts a v3 or v4 keystore into a keyring.
    pub fn decrypt(&self, record: &KeystoreRecord, password: &str) -> KeystoreResult<Keyring> {
        if record.crypto.is_some() && record.keyring.is_some() {
            return Err(KeystoreError::BothCryptoAndKeyring);
        }

        let mut lists: [Vec<PrivateKey>; ROLE_LAST] = Default::default();
        match record.version {
            VERSION_3 => {
                let crypto = record.crypto.as_ref().ok_or(KeystoreError::MissingField {
                    version: VERSION_3,
                    field: "crypto",
                })?;
                lists[0] = vec![self.decrypt_key(crypto, password)?];
            }
            VERSION_4 => {
                let keyring = record.keyring.as_ref().ok_or(KeystoreError::MissingField {
                    version: VERSION_4,
                    field: "keyring",
                })?;
                match keyring {
                    KeyringJson::Flat(keys) => lists[0] = self.decrypt_keys(keys, password)?,
                    KeyringJson::RoleBased(roles) => {
                        if roles.len() > ROLE_LAST {
                            return Err(KeyringError::WrongRoleCount(roles.len()).into());
                        }
                        for (slot, keys) in lists.iter_mut().zip(roles) {
                            *slot = self.decrypt_keys(keys, password)?;
                        }
                    }
                }
            }
            other => return Err(KeystoreError::UnsupportedVersion(other)),
        }

        let address = match (&record.address, lists.as_slice()) {
            (Some(address), _) => parse_address(address)?,
            (None, [transaction, update, fee_payer])
                if transaction.len() == 1 && update.is_empty() && fee_payer.is_empty() =>
            {
                transaction
                    .first()
                    .map(PrivateKey::derived_address)
                    .ok_or(KeystoreError::MissingField {
                        version: record.version,
                        field: "address",
                    })?
            }
            (None, _) => {
                return Err(KeystoreError::MissingField {
                    version: record.version,
                    field: "address",
                })
            }
        };

        debug!(
            version = record.version,
            keys = lists.iter().map(Vec::len).sum::<usize>(),
            "decrypted keystore"
        );
        Ok(Keyring::from_parts(address, lists)?)
    }

    /// Parses keystore JSON of either version and decrypts it.
    pub fn decrypt_json(&self, json: &str, password: &str) -> KeystoreResult<Keyring> {
        let record: KeystoreRecord = serde_json::from_str(json)?;
        self.decrypt(&record, password)
    }

    /// Encrypts one private key.
    pub fn encrypt_key(
        &self,
        key: &PrivateKey,
        password: &str,
        options: &EncryptOptions,
    ) -> KeystoreResult<CryptoJson> {
        let salt = match &options.salt {
            Some(salt) => salt.clone(),
            None => {
                let mut salt = vec![0u8; SALT_LEN];
                self.crypto.fill_random(&mut salt);
                salt
            }
        };
        let iv = match options.iv {
            Some(iv) => iv,
            None => {
                let mut iv = [0u8; IV_LEN];
                self.crypto.fill_random(&mut iv);
                iv
            }
        };

        let derived = options.kdf.derive(&self.crypto, password.as_bytes(), &salt)?;
        let (cipher_key, mac_key) = split_derived_key(&derived)?;
        let ciphertext = self
            .crypto
            .encrypt(options.cipher, cipher_key, &iv, &key.to_bytes())?;
        let mac = self.mac(mac_key, &ciphertext);
        trace!(kdf = options.kdf.name(), cipher = %options.cipher, "encrypted key");

        Ok(CryptoJson {
            ciphertext: hex::encode(ciphertext),
            cipherparams: CipherParams {
                iv: hex::encode(iv),
            },
            cipher: options.cipher.name().to_string(),
            kdf: options.kdf.name().to_string(),
            kdfparams: options.kdf.to_json(&salt),
            mac: hex::encode(mac),
        })
    }

    /// Decrypts one crypto object.
    ///
    /// Algorithm names are checked first, then the MAC; the cipher only runs once
    /// the MAC matches.
    pub fn decrypt_key(&self, crypto: &CryptoJson, password: &str) -> KeystoreResult<PrivateKey> {
        let kdf = KdfOptions::from_json(&crypto.kdf, &crypto.kdfparams)?;
        let cipher: Cipher = crypto.cipher.parse()?;
        let salt = decode_hex("kdfparams.salt", &crypto.kdfparams.salt)?;
        let iv = decode_hex("cipherparams.iv", &crypto.cipherparams.iv)?;
        let ciphertext = decode_hex("ciphertext", &crypto.ciphertext)?;
        let expected_mac = decode_hex("mac", &crypto.mac)?;

        let derived = kdf.derive(&self.crypto, password.as_bytes(), &salt)?;
        let (cipher_key, mac_key) = split_derived_key(&derived)?;
        let mac = self.mac(mac_key, &ciphertext);
        if mac.as_slice() != expected_mac.as_slice() {
            return Err(KeystoreError::WrongPassword);
        }

        let plaintext = self.crypto.decrypt(cipher, cipher_key, &iv, &ciphertext)?;
        trace!(kdf = kdf.name(), cipher = %cipher, "decrypted key");
        Ok(PrivateKey::from_bytes(&plaintext)?)
    }

    fn decrypt_keys(&self, keys: &[CryptoJson], password: &str) -> KeystoreResult<Vec<PrivateKey>> {
        keys.iter()
            .map(|crypto| self.decrypt_key(crypto, password))
            .collect()
    }

    fn mac(&self, mac_key: &[u8], ciphertext: &[u8]) -> alloy_primitives::B256 {
        let mut input = Vec::with_capacity(mac_key.len() + ciphertext.len());
        input.extend_from_slice(mac_key);
        input.extend_from_slice(ciphertext);
        self.crypto.keccak256(&input)
    }

    fn keystore_id(&self, options: &EncryptOptions) -> String {
        if let Some(id) = &options.id {
            return id.clone();
        }
        let mut bytes = [0u8; 16];
        self.crypto.fill_random(&mut bytes);
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }
}

fn resolve_keyring(source: KeySource, options: &EncryptOptions) -> KeystoreResult<Keyring> {
    match source {
        KeySource::Keyring(keyring) => Ok(keyring),
        KeySource::Material(material) => match (material, options.address.as_deref()) {
            (material, Some(address)) => Ok(Keyring::create(address, material)?),
            (KeyMaterial::Single(key), None) => {
                let address = key.derived_address();
                Ok(Keyring::from_parts(address, [vec![key], Vec::new(), Vec::new()])?)
            }
            (_, None) => Err(KeystoreError::AddressRequired),
        },
    }
}

/// `(cipher key, mac key)`: bytes `0..16` and `16..32`.
fn split_derived_key(derived: &[u8]) -> KeystoreResult<(&[u8], &[u8])> {
    match (derived.get(..16), derived.get(16..32)) {
        (Some(cipher_key), Some(mac_key)) => Ok((cipher_key, mac_key)),
        _ => Err(KeystoreError::InvalidKdfParams(format!(
            "derived key of {} bytes is too short",
            derived.len()
        ))),
    }
}

fn decode_hex(field: &'static str, value: &str) -> KeystoreResult<Vec<u8>> {
    hex::decode(strip_hex_prefix(value)).map_err(|_| KeystoreError::InvalidHex {
        field,
        value: value.to_string(),
    })
}
