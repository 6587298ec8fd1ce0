//! Configuration types for a klay client.

use klay_keystore::{Cipher, EncryptOptions, KdfOptions, KeystoreError};
use serde::Deserialize;

/// Root configuration for a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Chain-specific configuration.
    pub chain: ChainConfig,

    /// Keystore encryption settings.
    #[serde(default)]
    pub keystore: KeystoreConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Chain-specific configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    /// Chain id bound into transaction signatures. Must be > 0.
    pub chain_id: u64,
}

/// Keystore encryption settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeystoreConfig {
    /// Key derivation function: scrypt or pbkdf2. Default: scrypt.
    #[serde(default = "KeystoreConfig::default_kdf")]
    pub kdf: String,

    /// Cipher: aes-128-ctr or aes-128-cbc. Default: aes-128-ctr.
    #[serde(default = "KeystoreConfig::default_cipher")]
    pub cipher: String,

    #[serde(default)]
    pub scrypt: ScryptConfig,

    #[serde(default)]
    pub pbkdf2: Pbkdf2Config,
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            kdf: Self::default_kdf(),
            cipher: Self::default_cipher(),
            scrypt: ScryptConfig::default(),
            pbkdf2: Pbkdf2Config::default(),
        }
    }
}

impl KeystoreConfig {
    fn default_kdf() -> String {
        klay_keystore::kdf::SCRYPT.to_string()
    }

    fn default_cipher() -> String {
        Cipher::default().name().to_string()
    }

    /// KDF settings selected by `kdf`.
    pub fn kdf_options(&self) -> Result<KdfOptions, KeystoreError> {
        let options = match KdfOptions::by_name(&self.kdf)? {
            KdfOptions::Scrypt { .. } => KdfOptions::Scrypt {
                n: self.scrypt.n,
                r: self.scrypt.r,
                p: self.scrypt.p,
                dklen: self.scrypt.dklen,
            },
            KdfOptions::Pbkdf2 { .. } => KdfOptions::Pbkdf2 {
                c: self.pbkdf2.c,
                dklen: self.pbkdf2.dklen,
            },
        };
        options.validate()?;
        Ok(options)
    }

    /// Convert to the keystore crate's encryption options.
    pub fn to_encrypt_options(&self) -> Result<EncryptOptions, KeystoreError> {
        Ok(EncryptOptions::new()
            .with_kdf(self.kdf_options()?)
            .with_cipher(self.cipher.parse()?))
    }
}

/// scrypt cost parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScryptConfig {
    /// CPU/memory cost, a power of two. Default: 4096.
    #[serde(default = "ScryptConfig::default_n")]
    pub n: u32,

    /// Block size. Default: 8.
    #[serde(default = "ScryptConfig::default_r")]
    pub r: u32,

    /// Parallelism. Default: 1.
    #[serde(default = "ScryptConfig::default_p")]
    pub p: u32,

    /// Derived key length in bytes. Default: 32.
    #[serde(default = "default_dklen")]
    pub dklen: u32,
}

impl Default for ScryptConfig {
    fn default() -> Self {
        Self {
            n: Self::default_n(),
            r: Self::default_r(),
            p: Self::default_p(),
            dklen: default_dklen(),
        }
    }
}

impl ScryptConfig {
    const fn default_n() -> u32 {
        4096
    }

    const fn default_r() -> u32 {
        8
    }

    const fn default_p() -> u32 {
        1
    }
}

/// PBKDF2-HMAC-SHA256 parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pbkdf2Config {
    /// Iteration count. Default: 262144.
    #[serde(default = "Pbkdf2Config::default_c")]
    pub c: u32,

    /// Derived key length in bytes. Default: 32.
    #[serde(default = "default_dklen")]
    pub dklen: u32,
}

impl Default for Pbkdf2Config {
    fn default() -> Self {
        Self {
            c: Self::default_c(),
            dklen: default_dklen(),
        }
    }
}

impl Pbkdf2Config {
    const fn default_c() -> u32 {
        262_144
    }
}

const fn default_dklen() -> u32 {
    32
}

/// Observability configuration for logging.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservabilityConfig {
    /// Log level: trace, debug, info, warn, error. Default: info.
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,

    /// Log format: json or pretty. Default: json.
    #[serde(default = "ObservabilityConfig::default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            log_format: Self::default_log_format(),
        }
    }
}

impl ObservabilityConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }

    fn default_log_format() -> String {
        "json".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keystore_config_matches_keystore_defaults() {
        let config = KeystoreConfig::default();
        assert_eq!(config.kdf, "scrypt");
        assert_eq!(config.cipher, "aes-128-ctr");
        assert_eq!(config.kdf_options().unwrap(), KdfOptions::DEFAULT_SCRYPT);

        let options = config.to_encrypt_options().unwrap();
        assert_eq!(options, EncryptOptions::default());
    }

    #[test]
    fn test_pbkdf2_selection() {
        let config = KeystoreConfig {
            kdf: "PBKDF2".to_string(),
            cipher: "aes-128-cbc".to_string(),
            ..Default::default()
        };
        let options = config.to_encrypt_options().unwrap();
        assert_eq!(options.kdf, KdfOptions::DEFAULT_PBKDF2);
        assert_eq!(options.cipher, Cipher::Aes128Cbc);
    }

    #[test]
    fn test_unknown_algorithms_are_rejected() {
        let config = KeystoreConfig {
            kdf: "argon2".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.to_encrypt_options(),
            Err(KeystoreError::UnsupportedKdf(_))
        ));

        let config = KeystoreConfig {
            cipher: "aes-256-gcm".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.to_encrypt_options(),
            Err(KeystoreError::UnsupportedCipher(_))
        ));
    }

    #[test]
    fn test_default_observability_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "json");
    }
}
