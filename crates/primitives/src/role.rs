//! Functional key roles.

use std::fmt;

use crate::error::{PrimitiveError, PrimitiveResult};

/// Number of role slots in a keyring.
pub const ROLE_LAST: usize = 3;

/// Maximum number of keys a single role may hold.
pub const MAXIMUM_KEY_NUM: usize = 10;

/// A functional slot a key can be assigned to.
///
/// The discriminants are the slot indices and their order is part of the
/// keystore and account-key wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Signs ordinary transactions.
    TransactionKey = 0,
    /// Signs account-key update transactions.
    AccountUpdateKey = 1,
    /// Signs as fee payer in fee-delegated transactions.
    FeePayerKey = 2,
}

impl Role {
    /// All roles in slot order.
    pub const ALL: [Role; ROLE_LAST] = [
        Role::TransactionKey,
        Role::AccountUpdateKey,
        Role::FeePayerKey,
    ];

    /// Slot index of this role.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Role for a slot index.
    pub fn from_index(index: usize) -> PrimitiveResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(PrimitiveError::UnknownRole(index))
    }

    /// Role name as it appears in keystore and account-key JSON.
    pub const fn name(self) -> &'static str {
        match self {
            Role::TransactionKey => "roleTransactionKey",
            Role::AccountUpdateKey => "roleAccountUpdateKey",
            Role::FeePayerKey => "roleFeePayerKey",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
