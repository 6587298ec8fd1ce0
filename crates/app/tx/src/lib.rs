//! Klaytn typed transaction codec.
//!
//! Raw transactions are `tag ++ RLP(fields)` where the one-byte tag identifies
//! the type (see [`tx_type`]). Signing payloads put the tag inside the RLP list
//! instead and leave out all signature data.
//!
//! # Usage
//!
//! ```ignore
//! use klay_keyring::Keyring;
//! use klay_tx::{FeeDelegatedChainDataAnchoring, TxEnvelope, TypedTransaction};
//!
//! let mut tx = FeeDelegatedChainDataAnchoring::new(sender.address(), 100_000, input)?;
//! tx.set_nonce(0);
//! tx.set_gas_price(gas_price);
//! tx.set_chain_id(1001);
//! tx.sign(&sender, None)?;
//! tx.sign_as_fee_payer(&fee_payer, None)?;
//!
//! let raw = tx.rlp_encoding()?;
//! let decoded = TxEnvelope::decode(&raw)?;
//! ```

pub mod envelope;
pub mod error;
pub mod fee_delegated;
pub mod request;
pub mod rlp;
pub mod traits;
pub mod tx_type;

pub use envelope::TxEnvelope;
pub use error::{TxError, TxResult};
pub use fee_delegated::FeeDelegatedChainDataAnchoring;
pub use request::FeeDelegatedChainDataAnchoringRequest;
pub use traits::{FeeDelegatedTransaction, TypedTransaction};
