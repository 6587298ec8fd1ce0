//! Role-based keyring for Klaytn accounts.
//!
//! A [`Keyring`] binds an address to up to three lists of [`PrivateKey`]s, one per
//! [`Role`](klay_primitives::Role). It signs transaction digests (with chain-id
//! replay protection) and messages, and describes itself as an account key via
//! [`Keyring::to_account`].

pub mod account;
pub mod error;
pub mod keyring;
pub mod material;
pub mod private_key;
pub mod recovery;

pub use account::{
    AccountDescriptor, AccountKeyDescriptor, AccountKeyOptions, DefaultOptionsFiller,
    MultiSigOptionsFiller, RoleKeyDescriptor, WeightedMultiSigOptions,
};
pub use error::{KeyringError, KeyringResult};
pub use keyring::{Keyring, KeyringKind, SignedMessage};
pub use material::KeyMaterial;
pub use private_key::{split_klaytn_wallet_key, PrivateKey};
pub use recovery::{recover_message, recover_public_key, recover_verifying_key, recovery_id};
