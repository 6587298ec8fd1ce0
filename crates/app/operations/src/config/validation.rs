//! Configuration validation.
//!
//! Validates configuration and collects all errors before returning,
//! enabling users to fix multiple issues in a single iteration.

use klay_keystore::{kdf::MIN_DKLEN, Cipher, KdfOptions};

use crate::config::types::{ClientConfig, KeystoreConfig, ObservabilityConfig};
use crate::errors::ConfigError;
use crate::observability::logging::{LOG_FORMATS, LOG_LEVELS};

/// Validate the entire client configuration.
///
/// Collects all validation errors and returns them together, allowing users
/// to fix multiple issues at once.
pub fn validate_config(config: &ClientConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    validate_chain_config(config, &mut errors);
    validate_keystore_config(&config.keystore, &mut errors);
    validate_observability_config(&config.observability, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(errors))
    }
}

fn validate_chain_config(config: &ClientConfig, errors: &mut Vec<String>) {
    if config.chain.chain_id == 0 {
        errors.push("chain.chain_id must be greater than 0".to_string());
    }
}

fn validate_keystore_config(config: &KeystoreConfig, errors: &mut Vec<String>) {
    if KdfOptions::by_name(&config.kdf).is_err() {
        errors.push(format!(
            "keystore.kdf '{}' is invalid. Valid kdfs: scrypt, pbkdf2",
            config.kdf
        ));
    }

    if config.cipher.parse::<Cipher>().is_err() {
        errors.push(format!(
            "keystore.cipher '{}' is invalid. Valid ciphers: aes-128-ctr, aes-128-cbc",
            config.cipher
        ));
    }

    let scrypt = &config.scrypt;
    if scrypt.n < 2 || !scrypt.n.is_power_of_two() {
        errors.push(format!(
            "keystore.scrypt.n must be a power of two greater than 1, got {}",
            scrypt.n
        ));
    }
    if scrypt.r == 0 {
        errors.push("keystore.scrypt.r must be greater than 0".to_string());
    }
    if scrypt.p == 0 {
        errors.push("keystore.scrypt.p must be greater than 0".to_string());
    }
    if scrypt.dklen < MIN_DKLEN {
        errors.push(format!("keystore.scrypt.dklen must be at least {MIN_DKLEN}"));
    }

    if config.pbkdf2.c == 0 {
        errors.push("keystore.pbkdf2.c must be greater than 0".to_string());
    }
    if config.pbkdf2.dklen < MIN_DKLEN {
        errors.push(format!("keystore.pbkdf2.dklen must be at least {MIN_DKLEN}"));
    }
}

fn validate_observability_config(config: &ObservabilityConfig, errors: &mut Vec<String>) {
    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        errors.push(format!(
            "observability.log_level '{}' is invalid. Valid levels: trace, debug, info, warn, error",
            config.log_level
        ));
    }

    if !LOG_FORMATS.contains(&config.log_format.to_lowercase().as_str()) {
        errors.push(format!(
            "observability.log_format '{}' is invalid. Valid formats: json, pretty",
            config.log_format
        ));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::types::ChainConfig;
    use proptest::prelude::*;

    fn valid_config() -> ClientConfig {
        ClientConfig {
            chain: ChainConfig { chain_id: 1001 },
            keystore: KeystoreConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    fn errors_of(config: &ClientConfig) -> Vec<String> {
        match validate_config(config).unwrap_err() {
            ConfigError::ValidationFailed(errors) => errors,
            e => panic!("Expected ValidationFailed error, got {:?}", e),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_chain_id_fails() {
        let mut config = valid_config();
        config.chain.chain_id = 0;

        let errors = errors_of(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("chain_id"));
    }

    #[test]
    fn test_unknown_algorithms_fail() {
        let mut config = valid_config();
        config.keystore.kdf = "argon2".to_string();
        config.keystore.cipher = "aes-256-gcm".to_string();

        let errors = errors_of(&config);
        assert!(errors.iter().any(|e| e.contains("keystore.kdf")));
        assert!(errors.iter().any(|e| e.contains("keystore.cipher")));
    }

    #[test]
    fn test_kdf_and_cipher_names_are_case_insensitive() {
        let mut config = valid_config();
        config.keystore.kdf = "PBKDF2".to_string();
        config.keystore.cipher = "AES-128-CBC".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_short_dklen_fails() {
        let mut config = valid_config();
        config.keystore.scrypt.dklen = 16;
        config.keystore.pbkdf2.dklen = 31;

        let errors = errors_of(&config);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.contains("dklen")));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut config = valid_config();
        config.chain.chain_id = 0;
        config.keystore.scrypt.r = 0;
        config.keystore.pbkdf2.c = 0;
        config.observability.log_level = "loud".to_string();

        let errors = errors_of(&config);
        assert_eq!(errors.len(), 4, "got {:?}", errors);
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = valid_config();
        config.observability.log_format = "xml".to_string();

        let errors = errors_of(&config);
        assert!(errors.iter().any(|e| e.contains("log_format")));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_scrypt_n_accepted_iff_power_of_two(n in 0u32..(1 << 20)) {
            let mut config = valid_config();
            config.keystore.scrypt.n = n;
            let valid = n > 1 && n.is_power_of_two();
            prop_assert_eq!(validate_config(&config).is_ok(), valid);
        }
    }
}
