//! Core traits for typed transactions.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use klay_primitives::SignatureData;

use crate::error::{TxError, TxResult};
use crate::rlp::encode_list;

/// Common interface of every transaction type in the family.
pub trait TypedTransaction: Send + Sync {
    /// The type tag, first byte of the raw transaction.
    fn tx_type(&self) -> u8;

    fn sender(&self) -> Address;

    /// `None` until filled by the caller.
    fn nonce(&self) -> Option<u64>;

    fn gas(&self) -> u64;

    /// `None` until filled by the caller.
    fn gas_price(&self) -> Option<U256>;

    /// Chain the sender signatures are bound to.
    fn chain_id(&self) -> Option<u64>;

    /// Sender signatures, without empty placeholders.
    fn signatures(&self) -> &[SignatureData];

    /// Raw transaction bytes: `tag ++ RLP(fields)`.
    fn rlp_encoding(&self) -> TxResult<Bytes>;

    /// `RLP([tag, ...type-specific fields])` without any signature data.
    fn common_rlp_encoding_for_signature(&self) -> TxResult<Vec<u8>>;

    /// Sender signing payload: `RLP([common, chainId, 0, 0])`.
    fn rlp_encoding_for_signature(&self) -> TxResult<Vec<u8>> {
        let chain_id = self.chain_id().ok_or(TxError::MissingField("chainId"))?;
        let common = Bytes::from(self.common_rlp_encoding_for_signature()?);
        Ok(encode_list(&[&common, &chain_id, &0u8, &0u8]))
    }

    /// Digest the sender signs.
    fn hash_for_signature(&self) -> TxResult<B256> {
        Ok(keccak256(self.rlp_encoding_for_signature()?))
    }

    /// keccak256 of the raw transaction.
    fn transaction_hash(&self) -> TxResult<B256> {
        Ok(keccak256(self.rlp_encoding()?))
    }
}

/// Transactions whose fee is paid by a separate fee payer.
pub trait FeeDelegatedTransaction: TypedTransaction {
    fn fee_payer(&self) -> Option<Address>;

    fn fee_payer_signatures(&self) -> &[SignatureData];

    /// Fee payer signing payload: `RLP([common, feePayer, chainId, 0, 0])`.
    fn rlp_encoding_for_fee_payer_signature(&self) -> TxResult<Vec<u8>> {
        let fee_payer = self.fee_payer().ok_or(TxError::MissingField("feePayer"))?;
        let chain_id = self.chain_id().ok_or(TxError::MissingField("chainId"))?;
        let common = Bytes::from(self.common_rlp_encoding_for_signature()?);
        Ok(encode_list(&[&common, &fee_payer, &chain_id, &0u8, &0u8]))
    }

    /// Digest the fee payer signs.
    fn hash_for_fee_payer_signature(&self) -> TxResult<B256> {
        Ok(keccak256(self.rlp_encoding_for_fee_payer_signature()?))
    }

    /// Hash of the transaction as signed by the sender, before fee payer data is attached.
    fn sender_tx_hash(&self) -> TxResult<B256>;
}
