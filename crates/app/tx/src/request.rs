//! Object-style construction input.

use alloy_primitives::U256;
use klay_primitives::SignatureData;
use serde::{Deserialize, Serialize};

/// Fields of a fee-delegated chain-data-anchoring transaction as supplied by a caller.
///
/// `input` and `data` are aliases; exactly one must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeeDelegatedChainDataAnchoringRequest {
    pub from: String,
    pub gas: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<SignatureData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_payer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fee_payer_signatures: Vec<SignatureData>,
}
