//! Key derivation settings and their JSON parameter form.

use crate::crypto::CryptoPrimitives;
use crate::error::{KeystoreError, KeystoreResult};
use crate::format::KdfParams;

pub const SCRYPT: &str = "scrypt";
pub const PBKDF2: &str = "pbkdf2";
pub const HMAC_SHA256: &str = "hmac-sha256";

/// Smallest derived key that still covers the cipher key and MAC key halves.
pub const MIN_DKLEN: u32 = 32;

/// Which KDF to run and with what cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfOptions {
    Scrypt { n: u32, r: u32, p: u32, dklen: u32 },
    Pbkdf2 { c: u32, dklen: u32 },
}

impl KdfOptions {
    pub const DEFAULT_SCRYPT: KdfOptions = KdfOptions::Scrypt {
        n: 4096,
        r: 8,
        p: 1,
        dklen: 32,
    };

    pub const DEFAULT_PBKDF2: KdfOptions = KdfOptions::Pbkdf2 { c: 262_144, dklen: 32 };

    /// Defaults for a KDF by name.
    pub fn by_name(name: &str) -> KeystoreResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            SCRYPT => Ok(Self::DEFAULT_SCRYPT),
            PBKDF2 => Ok(Self::DEFAULT_PBKDF2),
            _ => Err(KeystoreError::UnsupportedKdf(name.to_string())),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            KdfOptions::Scrypt { .. } => SCRYPT,
            KdfOptions::Pbkdf2 { .. } => PBKDF2,
        }
    }

    pub const fn dklen(&self) -> u32 {
        match self {
            KdfOptions::Scrypt { dklen, .. } | KdfOptions::Pbkdf2 { dklen, .. } => *dklen,
        }
    }

    /// Checks cost parameters before any derivation runs.
    pub fn validate(&self) -> KeystoreResult<()> {
        if self.dklen() < MIN_DKLEN {
            return Err(KeystoreError::InvalidKdfParams(format!(
                "dklen {} is below {MIN_DKLEN}",
                self.dklen()
            )));
        }
        match *self {
            KdfOptions::Scrypt { n, r, p, .. } => {
                if n < 2 || !n.is_power_of_two() {
                    return Err(KeystoreError::InvalidKdfParams(format!(
                        "scrypt n must be a power of two greater than 1, got {n}"
                    )));
                }
                if r == 0 || p == 0 {
                    return Err(KeystoreError::InvalidKdfParams(
                        "scrypt r and p must be positive".to_string(),
                    ));
                }
            }
            KdfOptions::Pbkdf2 { c, .. } => {
                if c == 0 {
                    return Err(KeystoreError::InvalidKdfParams(
                        "pbkdf2 c must be positive".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Reads the settings stored in a crypto object.
    ///
    /// An unknown `kdf` or a pbkdf2 `prf` other than `hmac-sha256` is an
    /// unsupported algorithm; missing or out-of-range numbers are invalid params.
    pub fn from_json(kdf: &str, params: &KdfParams) -> KeystoreResult<Self> {
        let missing = |field: &str| KeystoreError::InvalidKdfParams(format!("{kdf} requires {field}"));
        let options = match kdf.to_ascii_lowercase().as_str() {
            SCRYPT => KdfOptions::Scrypt {
                n: params.n.ok_or_else(|| missing("n"))?,
                r: params.r.ok_or_else(|| missing("r"))?,
                p: params.p.ok_or_else(|| missing("p"))?,
                dklen: params.dklen,
            },
            PBKDF2 => {
                let prf = params.prf.as_deref().unwrap_or(HMAC_SHA256);
                if prf != HMAC_SHA256 {
                    return Err(KeystoreError::UnsupportedPrf(prf.to_string()));
                }
                KdfOptions::Pbkdf2 {
                    c: params.c.ok_or_else(|| missing("c"))?,
                    dklen: params.dklen,
                }
            }
            _ => return Err(KeystoreError::UnsupportedKdf(kdf.to_string())),
        };
        options.validate()?;
        Ok(options)
    }

    /// JSON parameters for these settings with the given salt.
    pub fn to_json(&self, salt: &[u8]) -> KdfParams {
        let salt = hex::encode(salt);
        match *self {
            KdfOptions::Scrypt { n, r, p, dklen } => KdfParams {
                dklen,
                salt,
                n: Some(n),
                r: Some(r),
                p: Some(p),
                c: None,
                prf: None,
            },
            KdfOptions::Pbkdf2 { c, dklen } => KdfParams {
                dklen,
                salt,
                n: None,
                r: None,
                p: None,
                c: Some(c),
                prf: Some(HMAC_SHA256.to_string()),
            },
        }
    }

    /// Derives `dklen` bytes from `password` and `salt`.
    pub fn derive<C: CryptoPrimitives + ?Sized>(
        &self,
        crypto: &C,
        password: &[u8],
        salt: &[u8],
    ) -> KeystoreResult<Vec<u8>> {
        self.validate()?;
        let mut derived = vec![0u8; self.dklen() as usize];
        match *self {
            KdfOptions::Scrypt { n, r, p, .. } => {
                // validate() guarantees a power of two
                let log_n = n.trailing_zeros() as u8;
                crypto.scrypt(password, salt, log_n, r, p, &mut derived)?;
            }
            KdfOptions::Pbkdf2 { c, .. } => crypto.pbkdf2_sha256(password, salt, c, &mut derived),
        }
        Ok(derived)
    }
}

impl Default for KdfOptions {
    fn default() -> Self {
        Self::DEFAULT_SCRYPT
    }
}
