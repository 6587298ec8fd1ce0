//! Fee-delegated chain data anchoring transaction (type `0x49`).
//!
//! Wire form:
//!
//! ```text
//! 0x49 ++ RLP([nonce, gasPrice, gas, from, input, signatures, feePayer, feePayerSignatures])
//! ```

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use klay_keyring::{recover_public_key, Keyring};
use klay_primitives::{address_to_hex, parse_address, parse_hex_bytes, Role, SignatureData};
use tracing::debug;

use crate::error::{TxError, TxResult};
use crate::request::FeeDelegatedChainDataAnchoringRequest;
use crate::rlp::{encode_list, wire_signatures, ListDecoder};
use crate::traits::{FeeDelegatedTransaction, TypedTransaction};
use crate::tx_type;

/// Anchors arbitrary service-chain data, with the fee paid by a fee payer.
///
/// Every setter validates before assigning, so a failed call leaves the
/// transaction unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeDelegatedChainDataAnchoring {
    from: Address,
    gas: u64,
    input: Bytes,
    nonce: Option<u64>,
    gas_price: Option<U256>,
    chain_id: Option<u64>,
    signatures: Vec<SignatureData>,
    fee_payer: Option<Address>,
    fee_payer_signatures: Vec<SignatureData>,
}

impl FeeDelegatedChainDataAnchoring {
    pub const TX_TYPE: u8 = tx_type::FEE_DELEGATED_CHAIN_DATA_ANCHORING;

    /// New unsigned transaction. `input` must not be empty.
    pub fn new(from: Address, gas: u64, input: Bytes) -> TxResult<Self> {
        check_input(&input)?;
        Ok(Self {
            from,
            gas,
            input,
            nonce: None,
            gas_price: None,
            chain_id: None,
            signatures: Vec::new(),
            fee_payer: None,
            fee_payer_signatures: Vec::new(),
        })
    }

    /// Builds a transaction from caller-supplied fields.
    ///
    /// Exactly one of `input` and `data` must be present.
    pub fn from_request(request: FeeDelegatedChainDataAnchoringRequest) -> TxResult<Self> {
        let input = match (request.input, request.data) {
            (Some(_), Some(_)) => return Err(TxError::InputAndData),
            (None, None) => return Err(TxError::MissingInput),
            (Some(input), None) | (None, Some(input)) => parse_input(&input)?,
        };
        let mut tx = Self::new(parse_address(&request.from)?, request.gas, input)?;
        tx.nonce = request.nonce;
        tx.gas_price = request.gas_price;
        tx.chain_id = request.chain_id;
        if let Some(fee_payer) = request.fee_payer.as_deref() {
            tx.set_fee_payer(fee_payer)?;
        }
        tx.append_signatures(request.signatures);
        tx.append_fee_payer_signatures(request.fee_payer_signatures);
        Ok(tx)
    }

    /// Object form of this transaction; addresses and input are lower-case hex.
    pub fn to_request(&self) -> FeeDelegatedChainDataAnchoringRequest {
        FeeDelegatedChainDataAnchoringRequest {
            from: address_to_hex(&self.from),
            gas: self.gas,
            nonce: self.nonce,
            gas_price: self.gas_price,
            chain_id: self.chain_id,
            input: Some(klay_primitives::to_hex(&self.input)),
            data: None,
            signatures: self.signatures.clone(),
            fee_payer: self.fee_payer.as_ref().map(address_to_hex),
            fee_payer_signatures: self.fee_payer_signatures.clone(),
        }
    }

    pub fn input(&self) -> &Bytes {
        &self.input
    }

    pub fn set_from(&mut self, from: &str) -> TxResult<()> {
        self.from = parse_address(from)?;
        Ok(())
    }

    /// Sets the fee payer. An empty string or `0x` clears it.
    pub fn set_fee_payer(&mut self, fee_payer: &str) -> TxResult<()> {
        self.fee_payer = match fee_payer {
            "" | "0x" => None,
            value => Some(parse_address(value)?),
        };
        Ok(())
    }

    /// Sets `input` from `0x`-prefixed hex; empty input is rejected.
    pub fn set_input(&mut self, input: &str) -> TxResult<()> {
        let input = parse_input(input)?;
        self.input = input;
        Ok(())
    }

    pub fn set_nonce(&mut self, nonce: u64) {
        self.nonce = Some(nonce);
    }

    pub fn set_gas(&mut self, gas: u64) {
        self.gas = gas;
    }

    pub fn set_gas_price(&mut self, gas_price: U256) {
        self.gas_price = Some(gas_price);
    }

    pub fn set_chain_id(&mut self, chain_id: u64) {
        self.chain_id = Some(chain_id);
    }

    /// Appends sender signatures, skipping empty placeholders and duplicates.
    pub fn append_signatures(&mut self, signatures: impl IntoIterator<Item = SignatureData>) {
        append_unique(&mut self.signatures, signatures);
    }

    /// Appends fee payer signatures, skipping empty placeholders and duplicates.
    pub fn append_fee_payer_signatures(
        &mut self,
        signatures: impl IntoIterator<Item = SignatureData>,
    ) {
        append_unique(&mut self.fee_payer_signatures, signatures);
    }

    /// Decodes raw bytes that must start with tag `0x49`.
    ///
    /// Numeric fields are normalised, empty signatures are dropped, an empty fee
    /// payer becomes `None`, and the chain id is taken from the first signature
    /// whose `v` carries one.
    pub fn decode(raw: &[u8]) -> TxResult<Self> {
        let (&tag, mut payload) = raw.split_first().ok_or(TxError::EmptyInput)?;
        if tag != Self::TX_TYPE {
            return Err(TxError::TypeTagMismatch {
                expected: Self::TX_TYPE,
                found: tag,
            });
        }

        let mut fields = ListDecoder::open(&mut payload)?;
        let nonce = fields.u64("nonce")?;
        let gas_price = fields.u256("gasPrice")?;
        let gas = fields.u64("gas")?;
        let from = fields.address("from")?;
        let input = Bytes::copy_from_slice(fields.bytes()?);
        let signatures = fields.signatures("signatures")?;
        let fee_payer = fields.optional_address("feePayer")?;
        let fee_payer_signatures = fields.signatures("feePayerSignatures")?;
        fields.finish()?;
        if !payload.is_empty() {
            return Err(TxError::TrailingBytes(payload.len()));
        }
        check_input(&input)?;

        let chain_id = signatures
            .iter()
            .chain(&fee_payer_signatures)
            .find_map(|signature| chain_id_from_v(signature.v));

        debug!(
            tx_type = tag,
            signatures = signatures.len(),
            fee_payer_signatures = fee_payer_signatures.len(),
            "decoded transaction"
        );
        Ok(Self {
            from,
            gas,
            input,
            nonce: Some(nonce),
            gas_price: Some(gas_price),
            chain_id,
            signatures,
            fee_payer,
            fee_payer_signatures,
        })
    }

    /// Signs as sender with `TransactionKey`, using one key when `index` is given
    /// and every key of the role otherwise.
    pub fn sign(&mut self, keyring: &Keyring, index: Option<usize>) -> TxResult<()> {
        if keyring.address() != self.from {
            return Err(TxError::AddressMismatch {
                role: "from",
                expected: keyring.address(),
                actual: self.from,
            });
        }
        let chain_id = self.chain_id.ok_or(TxError::MissingField("chainId"))?;
        let digest = self.hash_for_signature()?;
        let signatures = sign_with(keyring, digest, chain_id, Role::TransactionKey, index)?;
        debug!(signatures = signatures.len(), "signed as sender");
        self.append_signatures(signatures);
        Ok(())
    }

    /// Signs as fee payer with `FeePayerKey`. An unset fee payer is taken from the keyring.
    pub fn sign_as_fee_payer(&mut self, keyring: &Keyring, index: Option<usize>) -> TxResult<()> {
        let fee_payer = self.fee_payer.unwrap_or_else(|| keyring.address());
        if keyring.address() != fee_payer {
            return Err(TxError::AddressMismatch {
                role: "feePayer",
                expected: keyring.address(),
                actual: fee_payer,
            });
        }
        let chain_id = self.chain_id.ok_or(TxError::MissingField("chainId"))?;

        let mut candidate = self.clone();
        candidate.fee_payer = Some(fee_payer);
        let digest = candidate.hash_for_fee_payer_signature()?;
        let signatures = sign_with(keyring, digest, chain_id, Role::FeePayerKey, index)?;
        debug!(signatures = signatures.len(), "signed as fee payer");

        self.fee_payer = Some(fee_payer);
        self.append_fee_payer_signatures(signatures);
        Ok(())
    }

    /// Merges the signatures of raw transactions that carry the same content.
    ///
    /// An unset fee payer is adopted from the first raw transaction that has one.
    /// Returns the combined raw transaction.
    pub fn combine_signed_raw_transactions<B: AsRef<[u8]>>(&mut self, raws: &[B]) -> TxResult<Bytes> {
        let mut combined = self.clone();
        for raw in raws {
            let decoded = Self::decode(raw.as_ref())?;
            combined.check_same_content(&decoded)?;
            match (combined.fee_payer, decoded.fee_payer) {
                (None, Some(fee_payer)) => combined.fee_payer = Some(fee_payer),
                (Some(ours), Some(theirs)) if ours != theirs => {
                    return Err(TxError::CombineMismatch("feePayer"))
                }
                _ => {}
            }
            combined.append_signatures(decoded.signatures);
            combined.append_fee_payer_signatures(decoded.fee_payer_signatures);
        }
        let raw = combined.rlp_encoding()?;
        *self = combined;
        Ok(raw)
    }

    /// Uncompressed public keys that produced the sender signatures.
    pub fn recover_public_keys(&self) -> TxResult<Vec<String>> {
        let chain_id = self.chain_id.ok_or(TxError::MissingField("chainId"))?;
        let digest = self.hash_for_signature()?;
        self.signatures
            .iter()
            .map(|signature| {
                recover_public_key(digest, signature, Some(chain_id)).map_err(TxError::from)
            })
            .collect()
    }

    /// Uncompressed public keys that produced the fee payer signatures.
    pub fn recover_fee_payer_public_keys(&self) -> TxResult<Vec<String>> {
        let chain_id = self.chain_id.ok_or(TxError::MissingField("chainId"))?;
        let digest = self.hash_for_fee_payer_signature()?;
        self.fee_payer_signatures
            .iter()
            .map(|signature| {
                recover_public_key(digest, signature, Some(chain_id)).map_err(TxError::from)
            })
            .collect()
    }

    fn check_same_content(&self, other: &Self) -> TxResult<()> {
        if self.nonce != other.nonce {
            return Err(TxError::CombineMismatch("nonce"));
        }
        if self.gas_price != other.gas_price {
            return Err(TxError::CombineMismatch("gasPrice"));
        }
        if self.gas != other.gas {
            return Err(TxError::CombineMismatch("gas"));
        }
        if self.from != other.from {
            return Err(TxError::CombineMismatch("from"));
        }
        if self.input != other.input {
            return Err(TxError::CombineMismatch("input"));
        }
        Ok(())
    }

    fn defined_fields(&self) -> TxResult<(u64, U256)> {
        let nonce = self.nonce.ok_or(TxError::MissingField("nonce"))?;
        let gas_price = self.gas_price.ok_or(TxError::MissingField("gasPrice"))?;
        Ok((nonce, gas_price))
    }

    /// `RLP([nonce, gasPrice, gas, from, input, signatures])`, the sender-signed body.
    fn sender_body(&self) -> TxResult<Vec<u8>> {
        let (nonce, gas_price) = self.defined_fields()?;
        let signatures = wire_signatures(&self.signatures);
        Ok(encode_list(&[
            &nonce,
            &gas_price,
            &self.gas,
            &self.from,
            &self.input,
            &signatures,
        ]))
    }
}

impl TypedTransaction for FeeDelegatedChainDataAnchoring {
    fn tx_type(&self) -> u8 {
        Self::TX_TYPE
    }

    fn sender(&self) -> Address {
        self.from
    }

    fn nonce(&self) -> Option<u64> {
        self.nonce
    }

    fn gas(&self) -> u64 {
        self.gas
    }

    fn gas_price(&self) -> Option<U256> {
        self.gas_price
    }

    fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    fn signatures(&self) -> &[SignatureData] {
        &self.signatures
    }

    /// Requires nonce, gas price and chain id to be defined.
    fn rlp_encoding(&self) -> TxResult<Bytes> {
        let (nonce, gas_price) = self.defined_fields()?;
        self.chain_id.ok_or(TxError::MissingField("chainId"))?;

        let signatures = wire_signatures(&self.signatures);
        let fee_payer_signatures = wire_signatures(&self.fee_payer_signatures);
        let fee_payer = self
            .fee_payer
            .map(|address| Bytes::copy_from_slice(address.as_slice()))
            .unwrap_or_default();
        let body = encode_list(&[
            &nonce,
            &gas_price,
            &self.gas,
            &self.from,
            &self.input,
            &signatures,
            &fee_payer,
            &fee_payer_signatures,
        ]);

        let mut raw = Vec::with_capacity(1 + body.len());
        raw.push(Self::TX_TYPE);
        raw.extend_from_slice(&body);
        Ok(raw.into())
    }

    fn common_rlp_encoding_for_signature(&self) -> TxResult<Vec<u8>> {
        let (nonce, gas_price) = self.defined_fields()?;
        Ok(encode_list(&[
            &Self::TX_TYPE,
            &nonce,
            &gas_price,
            &self.gas,
            &self.from,
            &self.input,
        ]))
    }
}

impl FeeDelegatedTransaction for FeeDelegatedChainDataAnchoring {
    fn fee_payer(&self) -> Option<Address> {
        self.fee_payer
    }

    fn fee_payer_signatures(&self) -> &[SignatureData] {
        &self.fee_payer_signatures
    }

    fn sender_tx_hash(&self) -> TxResult<B256> {
        let body = self.sender_body()?;
        let mut raw = Vec::with_capacity(1 + body.len());
        raw.push(Self::TX_TYPE);
        raw.extend_from_slice(&body);
        Ok(keccak256(raw))
    }
}

impl TryFrom<FeeDelegatedChainDataAnchoringRequest> for FeeDelegatedChainDataAnchoring {
    type Error = TxError;

    fn try_from(request: FeeDelegatedChainDataAnchoringRequest) -> TxResult<Self> {
        Self::from_request(request)
    }
}

fn parse_input(value: &str) -> TxResult<Bytes> {
    let input = parse_hex_bytes(value)?;
    check_input(&input)?;
    Ok(input)
}

fn check_input(input: &Bytes) -> TxResult<()> {
    if input.is_empty() {
        return Err(TxError::InvalidField {
            field: "input",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn append_unique(
    existing: &mut Vec<SignatureData>,
    signatures: impl IntoIterator<Item = SignatureData>,
) {
    for signature in signatures {
        if !signature.is_empty() && !existing.contains(&signature) {
            existing.push(signature);
        }
    }
}

fn sign_with(
    keyring: &Keyring,
    digest: B256,
    chain_id: u64,
    role: Role,
    index: Option<usize>,
) -> TxResult<Vec<SignatureData>> {
    Ok(match index {
        Some(index) => vec![keyring.sign_with_key(digest, chain_id, role, index)?],
        None => keyring.sign_with_keys(digest, chain_id, role)?,
    })
}

/// Chain id carried by a replay-protected `v`, i.e. `v >= 35`.
fn chain_id_from_v(v: u64) -> Option<u64> {
    v.checked_sub(35).map(|rest| rest / 2)
}
