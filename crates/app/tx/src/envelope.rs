//! Envelope dispatching raw transactions by type tag.

use alloy_primitives::{Address, Bytes, U256};
use klay_primitives::SignatureData;

use crate::error::{TxError, TxResult};
use crate::fee_delegated::FeeDelegatedChainDataAnchoring;
use crate::traits::TypedTransaction;
use crate::tx_type;

/// Any transaction this crate can decode.
///
/// Every tag of the family is recognised; tags without a codec here fail with
/// [`TxError::UnsupportedTxType`] rather than [`TxError::UnknownTxType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxEnvelope {
    FeeDelegatedChainDataAnchoring(FeeDelegatedChainDataAnchoring),
}

impl TxEnvelope {
    /// Decodes a raw transaction.
    ///
    /// A leading RLP list prefix (`>= 0xc0`) marks an untyped legacy transaction.
    pub fn decode(raw: &[u8]) -> TxResult<Self> {
        let first_byte = *raw.first().ok_or(TxError::EmptyInput)?;
        if first_byte >= 0xc0 {
            return Err(TxError::UnsupportedTxType(tx_type::LEGACY));
        }
        match first_byte {
            tx_type::FEE_DELEGATED_CHAIN_DATA_ANCHORING => Ok(
                TxEnvelope::FeeDelegatedChainDataAnchoring(FeeDelegatedChainDataAnchoring::decode(raw)?),
            ),
            tag if tx_type::is_known(tag) => Err(TxError::UnsupportedTxType(tag)),
            tag => Err(TxError::UnknownTxType(tag)),
        }
    }

    pub fn encode(&self) -> TxResult<Bytes> {
        self.rlp_encoding()
    }
}

impl From<FeeDelegatedChainDataAnchoring> for TxEnvelope {
    fn from(tx: FeeDelegatedChainDataAnchoring) -> Self {
        TxEnvelope::FeeDelegatedChainDataAnchoring(tx)
    }
}

impl TypedTransaction for TxEnvelope {
    fn tx_type(&self) -> u8 {
        match self {
            TxEnvelope::FeeDelegatedChainDataAnchoring(tx) => tx.tx_type(),
        }
    }

    fn sender(&self) -> Address {
        match self {
            TxEnvelope::FeeDelegatedChainDataAnchoring(tx) => tx.sender(),
        }
    }

    fn nonce(&self) -> Option<u64> {
        match self {
            TxEnvelope::FeeDelegatedChainDataAnchoring(tx) => tx.nonce(),
        }
    }

    fn gas(&self) -> u64 {
        match self {
            TxEnvelope::FeeDelegatedChainDataAnchoring(tx) => tx.gas(),
        }
    }

    fn gas_price(&self) -> Option<U256> {
        match self {
            TxEnvelope::FeeDelegatedChainDataAnchoring(tx) => tx.gas_price(),
        }
    }

    fn chain_id(&self) -> Option<u64> {
        match self {
            TxEnvelope::FeeDelegatedChainDataAnchoring(tx) => tx.chain_id(),
        }
    }

    fn signatures(&self) -> &[SignatureData] {
        match self {
            TxEnvelope::FeeDelegatedChainDataAnchoring(tx) => tx.signatures(),
        }
    }

    fn rlp_encoding(&self) -> TxResult<Bytes> {
        match self {
            TxEnvelope::FeeDelegatedChainDataAnchoring(tx) => tx.rlp_encoding(),
        }
    }

    fn common_rlp_encoding_for_signature(&self) -> TxResult<Vec<u8>> {
        match self {
            TxEnvelope::FeeDelegatedChainDataAnchoring(tx) => tx.common_rlp_encoding_for_signature(),
        }
    }
}
