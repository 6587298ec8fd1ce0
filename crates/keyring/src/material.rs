//! Key material accepted by keyring factories.

use klay_primitives::{Role, MAXIMUM_KEY_NUM, ROLE_LAST};

use crate::error::{KeyringError, KeyringResult};
use crate::private_key::PrivateKey;

/// The three shapes key material can take.
///
/// Every shape resolves once into the canonical per-role lists via
/// [`KeyMaterial::into_role_lists`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// One key, placed in `TransactionKey`.
    Single(PrivateKey),
    /// Several keys, all placed in `TransactionKey`.
    Multiple(Vec<PrivateKey>),
    /// Up to three lists, one per role in slot order; missing roles are empty.
    RoleBased(Vec<Vec<PrivateKey>>),
}

impl KeyMaterial {
    /// Parses a single hex key.
    pub fn single_hex(key: &str) -> KeyringResult<Self> {
        Ok(KeyMaterial::Single(key.parse()?))
    }

    /// Parses a list of hex keys.
    pub fn multiple_hex<S: AsRef<str>>(keys: &[S]) -> KeyringResult<Self> {
        Ok(KeyMaterial::Multiple(parse_keys(keys)?))
    }

    /// Parses per-role lists of hex keys.
    pub fn role_based_hex<S: AsRef<str>>(roles: &[Vec<S>]) -> KeyringResult<Self> {
        let parsed = roles
            .iter()
            .map(|keys| parse_keys(keys))
            .collect::<KeyringResult<Vec<_>>>()?;
        Ok(KeyMaterial::RoleBased(parsed))
    }

    /// Total number of keys across all roles.
    pub fn key_count(&self) -> usize {
        match self {
            KeyMaterial::Single(_) => 1,
            KeyMaterial::Multiple(keys) => keys.len(),
            KeyMaterial::RoleBased(roles) => roles.iter().map(Vec::len).sum(),
        }
    }

    /// Resolves into exactly [`ROLE_LAST`] lists, enforcing the per-role maximum.
    pub fn into_role_lists(self) -> KeyringResult<[Vec<PrivateKey>; ROLE_LAST]> {
        let lists = match self {
            KeyMaterial::Single(key) => [vec![key], Vec::new(), Vec::new()],
            KeyMaterial::Multiple(keys) => [keys, Vec::new(), Vec::new()],
            KeyMaterial::RoleBased(roles) => {
                if roles.len() > ROLE_LAST {
                    return Err(KeyringError::WrongRoleCount(roles.len()));
                }
                let mut lists: [Vec<PrivateKey>; ROLE_LAST] = Default::default();
                for (slot, keys) in lists.iter_mut().zip(roles) {
                    *slot = keys;
                }
                lists
            }
        };
        for (role, keys) in Role::ALL.into_iter().zip(lists.iter()) {
            check_key_count(role, keys.len())?;
        }
        Ok(lists)
    }
}

impl From<PrivateKey> for KeyMaterial {
    fn from(key: PrivateKey) -> Self {
        KeyMaterial::Single(key)
    }
}

impl From<Vec<PrivateKey>> for KeyMaterial {
    fn from(keys: Vec<PrivateKey>) -> Self {
        KeyMaterial::Multiple(keys)
    }
}

impl From<Vec<Vec<PrivateKey>>> for KeyMaterial {
    fn from(roles: Vec<Vec<PrivateKey>>) -> Self {
        KeyMaterial::RoleBased(roles)
    }
}

pub(crate) fn check_key_count(role: Role, count: usize) -> KeyringResult<()> {
    if count > MAXIMUM_KEY_NUM {
        return Err(KeyringError::TooManyKeys {
            role,
            count,
            max: MAXIMUM_KEY_NUM,
        });
    }
    Ok(())
}

fn parse_keys<S: AsRef<str>>(keys: &[S]) -> KeyringResult<Vec<PrivateKey>> {
    keys.iter().map(|key| key.as_ref().parse()).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn keys(n: usize) -> Vec<PrivateKey> {
        (0..n).map(|_| PrivateKey::generate(None)).collect()
    }

    #[test]
    fn test_single_and_multiple_fill_transaction_role() {
        let key = PrivateKey::generate(None);
        let [tx, update, fee] = KeyMaterial::from(key.clone()).into_role_lists().unwrap();
        assert_eq!(tx, vec![key]);
        assert!(update.is_empty() && fee.is_empty());

        let many = keys(3);
        let [tx, update, fee] = KeyMaterial::from(many.clone()).into_role_lists().unwrap();
        assert_eq!(tx, many);
        assert!(update.is_empty() && fee.is_empty());
    }

    #[test]
    fn test_role_based_pads_missing_roles() {
        let first = keys(2);
        let second = keys(1);
        let lists = KeyMaterial::RoleBased(vec![first.clone(), second.clone()])
            .into_role_lists()
            .unwrap();
        assert_eq!(lists, [first, second, Vec::new()]);
    }

    #[test]
    fn test_role_based_rejects_extra_roles() {
        let err = KeyMaterial::RoleBased(vec![keys(1), keys(1), keys(1), keys(1)])
            .into_role_lists()
            .unwrap_err();
        assert_eq!(err, KeyringError::WrongRoleCount(4));
    }

    #[test]
    fn test_rejects_too_many_keys() {
        let err = KeyMaterial::Multiple(keys(MAXIMUM_KEY_NUM + 1))
            .into_role_lists()
            .unwrap_err();
        assert!(matches!(
            err,
            KeyringError::TooManyKeys {
                role: Role::TransactionKey,
                ..
            }
        ));
    }

    #[test]
    fn test_hex_constructors_propagate_parse_errors() {
        assert!(KeyMaterial::single_hex("0x01").is_err());
        assert!(KeyMaterial::multiple_hex(&["0x01"]).is_err());
        assert!(KeyMaterial::role_based_hex(&[vec!["0x01"]]).is_err());
    }
}
