//! Account key descriptors derived from a keyring.
//!
//! The keyring only decides the shape (public, weighted multisig or role-based)
//! and hands each role's public keys plus resolved threshold/weights to the
//! account model. Default thresholds and weights come from a
//! [`MultiSigOptionsFiller`], so callers can plug in their own policy.

use alloy_primitives::Address;
use klay_primitives::{Role, ROLE_LAST};
use serde::Serialize;
use tracing::debug;

use crate::error::{KeyringError, KeyringResult};
use crate::keyring::Keyring;

/// Threshold and per-key weights of a weighted multisig key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedMultiSigOptions {
    pub threshold: u32,
    pub weights: Vec<u32>,
}

impl WeightedMultiSigOptions {
    pub fn new(threshold: u32, weights: Vec<u32>) -> Self {
        Self { threshold, weights }
    }

    /// Checks the options against the number of keys they apply to.
    pub fn validate(&self, key_count: usize) -> KeyringResult<()> {
        if self.weights.len() != key_count {
            return Err(KeyringError::InvalidMultiSigOptions(format!(
                "{} weights for {} keys",
                self.weights.len(),
                key_count
            )));
        }
        if self.threshold == 0 {
            return Err(KeyringError::InvalidMultiSigOptions(
                "threshold must be positive".to_string(),
            ));
        }
        let total: u64 = self.weights.iter().map(|w| u64::from(*w)).sum();
        if total < u64::from(self.threshold) {
            return Err(KeyringError::InvalidMultiSigOptions(format!(
                "weight sum {total} is below threshold {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Caller-supplied hints for [`Keyring::to_account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKeyOptions {
    /// Options for a keyring that only uses `TransactionKey`.
    Single(WeightedMultiSigOptions),
    /// Per-role options in slot order; `None` or a missing entry means defaults.
    PerRole(Vec<Option<WeightedMultiSigOptions>>),
}

/// Fills threshold/weight defaults for a role holding `key_count` keys.
pub trait MultiSigOptionsFiller {
    fn fill(
        &self,
        key_count: usize,
        options: Option<WeightedMultiSigOptions>,
    ) -> KeyringResult<WeightedMultiSigOptions>;
}

/// Threshold 1 and weight 1 per key when nothing is given; explicit options are validated as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOptionsFiller;

impl MultiSigOptionsFiller for DefaultOptionsFiller {
    fn fill(
        &self,
        key_count: usize,
        options: Option<WeightedMultiSigOptions>,
    ) -> KeyringResult<WeightedMultiSigOptions> {
        let options = options.unwrap_or_else(|| WeightedMultiSigOptions::new(1, vec![1; key_count]));
        options.validate(key_count)?;
        Ok(options)
    }
}

/// Key descriptor of one role inside a role-based account key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RoleKeyDescriptor {
    /// Role left unset; the node keeps the current key.
    Nil,
    Public {
        public_key: String,
    },
    WeightedMultiSig {
        public_keys: Vec<String>,
        options: WeightedMultiSigOptions,
    },
}

/// Account key shape handed to the account model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AccountKeyDescriptor {
    Public {
        public_key: String,
    },
    WeightedMultiSig {
        public_keys: Vec<String>,
        options: WeightedMultiSigOptions,
    },
    RoleBased {
        roles: [RoleKeyDescriptor; ROLE_LAST],
    },
}

/// Address plus the account key to register for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDescriptor {
    pub address: Address,
    pub account_key: AccountKeyDescriptor,
}

impl Keyring {
    /// [`Keyring::to_account_with`] using [`DefaultOptionsFiller`].
    pub fn to_account(&self, options: Option<AccountKeyOptions>) -> KeyringResult<AccountDescriptor> {
        self.to_account_with(options, &DefaultOptionsFiller)
    }

    /// Builds the account descriptor for this keyring.
    ///
    /// A keyring using any role other than `TransactionKey` yields a role-based key and
    /// accepts only [`AccountKeyOptions::PerRole`]. Otherwise several keys, or one key
    /// with [`AccountKeyOptions::Single`], yield a weighted multisig key; one key without
    /// options yields a public key.
    pub fn to_account_with(
        &self,
        options: Option<AccountKeyOptions>,
        filler: &dyn MultiSigOptionsFiller,
    ) -> KeyringResult<AccountDescriptor> {
        if self.keys().iter().all(Vec::is_empty) {
            return Err(KeyringError::NoKeys);
        }
        let public_keys = self.public_keys(false);

        let role_based = Role::ALL
            .iter()
            .any(|role| *role != Role::TransactionKey && !self.role_keys(*role).is_empty());

        let account_key = if role_based {
            let mut per_role = match options {
                None => Vec::new(),
                Some(AccountKeyOptions::PerRole(per_role)) => per_role,
                Some(AccountKeyOptions::Single(_)) => {
                    return Err(KeyringError::OptionsMismatch(
                        "role-based keyring requires per-role options",
                    ))
                }
            };
            if per_role.len() > ROLE_LAST {
                return Err(KeyringError::WrongRoleCount(per_role.len()));
            }
            per_role.resize(ROLE_LAST, None);

            let mut roles: [RoleKeyDescriptor; ROLE_LAST] =
                [RoleKeyDescriptor::Nil, RoleKeyDescriptor::Nil, RoleKeyDescriptor::Nil];
            for ((slot, keys), options) in roles.iter_mut().zip(public_keys).zip(per_role) {
                *slot = role_descriptor(keys, options, filler)?;
            }
            AccountKeyDescriptor::RoleBased { roles }
        } else {
            let keys = public_keys.into_iter().next().unwrap_or_default();
            let options = match options {
                None => None,
                Some(AccountKeyOptions::Single(options)) => Some(options),
                Some(AccountKeyOptions::PerRole(_)) => {
                    return Err(KeyringError::OptionsMismatch(
                        "per-role options require a role-based keyring",
                    ))
                }
            };
            match (keys.as_slice(), options) {
                ([public_key], None) => AccountKeyDescriptor::Public {
                    public_key: public_key.clone(),
                },
                (_, options) => {
                    let options = filler.fill(keys.len(), options)?;
                    AccountKeyDescriptor::WeightedMultiSig {
                        public_keys: keys,
                        options,
                    }
                }
            }
        };

        debug!(address = %self.address_hex(), "built account descriptor");
        Ok(AccountDescriptor {
            address: self.address(),
            account_key,
        })
    }
}

fn role_descriptor(
    keys: Vec<String>,
    options: Option<WeightedMultiSigOptions>,
    filler: &dyn MultiSigOptionsFiller,
) -> KeyringResult<RoleKeyDescriptor> {
    match (keys.as_slice(), options) {
        ([], None) => Ok(RoleKeyDescriptor::Nil),
        ([], Some(_)) => Err(KeyringError::OptionsMismatch(
            "options defined for a role without keys",
        )),
        ([public_key], None) => Ok(RoleKeyDescriptor::Public {
            public_key: public_key.clone(),
        }),
        (_, options) => {
            let options = filler.fill(keys.len(), options)?;
            Ok(RoleKeyDescriptor::WeightedMultiSig {
                public_keys: keys,
                options,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ADDRESS: &str = "0x3fa9d4c43c4a8c8e5c1e9dcc9b4d2b3e1f6f7a8b";

    #[test]
    fn test_single_key_is_public() {
        let keyring = Keyring::generate(None);
        let account = keyring.to_account(None).unwrap();
        assert_eq!(
            account.account_key,
            AccountKeyDescriptor::Public {
                public_key: keyring.role_keys(Role::TransactionKey)[0].public_key(false)
            }
        );
        assert_eq!(account.address, keyring.address());
    }

    #[test]
    fn test_single_key_with_options_is_weighted() {
        let keyring = Keyring::generate(None);
        let options = WeightedMultiSigOptions::new(1, vec![1]);
        let account = keyring
            .to_account(Some(AccountKeyOptions::Single(options.clone())))
            .unwrap();
        match account.account_key {
            AccountKeyDescriptor::WeightedMultiSig {
                public_keys,
                options: resolved,
            } => {
                assert_eq!(public_keys.len(), 1);
                assert_eq!(resolved, options);
            }
            other => panic!("unexpected descriptor {other:?}"),
        }
    }

    #[test]
    fn test_multiple_keys_get_default_weights() {
        let keys = Keyring::generate_multiple_keys(3, None);
        let keyring = Keyring::create_with_multiple_key(ADDRESS, &keys).unwrap();
        let account = keyring.to_account(None).unwrap();
        assert_eq!(
            account.account_key,
            AccountKeyDescriptor::WeightedMultiSig {
                public_keys: keyring.public_keys(false)[0].clone(),
                options: WeightedMultiSigOptions::new(1, vec![1, 1, 1]),
            }
        );
    }

    #[test]
    fn test_role_based_shapes_per_role() {
        let roles = Keyring::generate_role_based_keys([2, 0, 1], None);
        let keyring = Keyring::create_with_role_based_key(ADDRESS, &roles).unwrap();
        let options = AccountKeyOptions::PerRole(vec![Some(WeightedMultiSigOptions::new(2, vec![1, 1]))]);
        let account = keyring.to_account(Some(options)).unwrap();

        let AccountKeyDescriptor::RoleBased { roles } = account.account_key else {
            panic!("expected role-based descriptor");
        };
        assert!(matches!(
            &roles[0],
            RoleKeyDescriptor::WeightedMultiSig { options, .. } if options.threshold == 2
        ));
        assert_eq!(roles[1], RoleKeyDescriptor::Nil);
        assert!(matches!(roles[2], RoleKeyDescriptor::Public { .. }));
    }

    #[test]
    fn test_option_shape_mismatches() {
        let keyring = Keyring::generate(None);
        let err = keyring
            .to_account(Some(AccountKeyOptions::PerRole(vec![None])))
            .unwrap_err();
        assert!(matches!(err, KeyringError::OptionsMismatch(_)));

        let roles = Keyring::generate_role_based_keys([1, 1, 1], None);
        let keyring = Keyring::create_with_role_based_key(ADDRESS, &roles).unwrap();
        let err = keyring
            .to_account(Some(AccountKeyOptions::Single(WeightedMultiSigOptions::new(
                1,
                vec![1],
            ))))
            .unwrap_err();
        assert!(matches!(err, KeyringError::OptionsMismatch(_)));
    }

    #[test]
    fn test_invalid_weights_are_rejected() {
        let keys = Keyring::generate_multiple_keys(2, None);
        let keyring = Keyring::create_with_multiple_key(ADDRESS, &keys).unwrap();

        let short = AccountKeyOptions::Single(WeightedMultiSigOptions::new(1, vec![1]));
        assert!(keyring.to_account(Some(short)).is_err());

        let unreachable = AccountKeyOptions::Single(WeightedMultiSigOptions::new(5, vec![1, 1]));
        assert!(matches!(
            keyring.to_account(Some(unreachable)).unwrap_err(),
            KeyringError::InvalidMultiSigOptions(_)
        ));
    }

    #[test]
    fn test_empty_keyring_fails() {
        let empty: Vec<Vec<String>> = vec![vec![], vec![], vec![]];
        let keyring = Keyring::create_with_role_based_key(ADDRESS, &empty).unwrap();
        assert_eq!(keyring.to_account(None).unwrap_err(), KeyringError::NoKeys);
    }

    #[test]
    fn test_custom_filler_is_consulted() {
        struct Majority;
        impl MultiSigOptionsFiller for Majority {
            fn fill(
                &self,
                key_count: usize,
                options: Option<WeightedMultiSigOptions>,
            ) -> KeyringResult<WeightedMultiSigOptions> {
                Ok(options.unwrap_or_else(|| {
                    WeightedMultiSigOptions::new(key_count as u32 / 2 + 1, vec![1; key_count])
                }))
            }
        }

        let keys = Keyring::generate_multiple_keys(3, None);
        let keyring = Keyring::create_with_multiple_key(ADDRESS, &keys).unwrap();
        let account = keyring.to_account_with(None, &Majority).unwrap();
        let AccountKeyDescriptor::WeightedMultiSig { options, .. } = account.account_key else {
            panic!("expected weighted multisig");
        };
        assert_eq!(options.threshold, 2);
    }

    #[test]
    fn test_descriptor_json_shape() {
        let roles = Keyring::generate_role_based_keys([1, 0, 2], None);
        let keyring = Keyring::create_with_role_based_key(ADDRESS, &roles).unwrap();
        let json = serde_json::to_value(keyring.to_account(None).unwrap()).unwrap();

        assert_eq!(json["address"].as_str().unwrap().to_lowercase(), ADDRESS);
        assert_eq!(json["accountKey"]["type"], "roleBased");
        assert_eq!(json["accountKey"]["roles"][0]["type"], "public");
        assert!(json["accountKey"]["roles"][0]["publicKey"].is_string());
        assert_eq!(json["accountKey"]["roles"][1]["type"], "nil");
        assert_eq!(json["accountKey"]["roles"][2]["type"], "weightedMultiSig");
        assert_eq!(json["accountKey"]["roles"][2]["options"]["weights"], serde_json::json!([1, 1]));
    }
}
