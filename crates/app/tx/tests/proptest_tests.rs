//! Property-based tests for transaction encoding/decoding roundtrips.

use alloy_primitives::{Address, Bytes, U256};
use klay_primitives::{address_to_hex, SignatureData};
use klay_tx::{tx_type, FeeDelegatedChainDataAnchoring, TxEnvelope, TxError, TypedTransaction};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating random transaction data
// ============================================================================

fn arb_address() -> impl Strategy<Value = Address> {
    prop::array::uniform20(any::<u8>()).prop_map(Address::from)
}

fn arb_input(max_len: usize) -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 1..max_len).prop_map(Bytes::from)
}

fn arb_u256() -> impl Strategy<Value = U256> {
    prop::array::uniform32(any::<u8>()).prop_map(U256::from_be_bytes)
}

/// Non-zero `r`/`s` so a signature never collapses into the empty placeholder.
fn arb_signatures(chain_id: u64) -> impl Strategy<Value = Vec<SignatureData>> {
    prop::collection::vec((0u64..2, 1u64..u64::MAX, arb_u256()), 1..5).prop_map(move |sigs| {
        sigs.into_iter()
            .map(|(parity, r, s)| {
                SignatureData::new(chain_id * 2 + 35 + parity, U256::from(r), s)
            })
            .collect()
    })
}

fn arb_tx() -> impl Strategy<Value = FeeDelegatedChainDataAnchoring> {
    (1u64..1_000_000).prop_flat_map(|chain_id| {
        (
            any::<u64>(),                             // nonce
            prop_oneof![Just(U256::ZERO), arb_u256()], // gas price
            any::<u64>(),                             // gas
            arb_address(),                            // from
            arb_input(256),                           // input
            arb_signatures(chain_id),                 // sender signatures
            prop::option::of(arb_address()),          // fee payer
            prop::collection::vec(arb_signatures(chain_id), 0..2), // fee payer signatures
        )
            .prop_map(
                move |(nonce, gas_price, gas, from, input, sigs, fee_payer, fee_payer_sigs)| {
                    let mut tx = FeeDelegatedChainDataAnchoring::new(from, gas, input).unwrap();
                    tx.set_nonce(nonce);
                    tx.set_gas_price(gas_price);
                    tx.set_chain_id(chain_id);
                    tx.append_signatures(sigs);
                    if let Some(fee_payer) = fee_payer {
                        tx.set_fee_payer(&address_to_hex(&fee_payer)).unwrap();
                        tx.append_fee_payer_signatures(fee_payer_sigs.into_iter().flatten());
                    }
                    tx
                },
            )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_decode_encode_roundtrip(tx in arb_tx()) {
        let raw = tx.rlp_encoding().unwrap();
        let decoded = FeeDelegatedChainDataAnchoring::decode(&raw).unwrap();
        prop_assert_eq!(&decoded, &tx);
        prop_assert_eq!(decoded.rlp_encoding().unwrap(), raw);
    }

    #[test]
    fn prop_zero_numeric_fields_roundtrip(from in arb_address(), input in arb_input(32)) {
        let mut tx = FeeDelegatedChainDataAnchoring::new(from, 0, input).unwrap();
        tx.set_nonce(0);
        tx.set_gas_price(U256::ZERO);
        tx.set_chain_id(1);
        tx.append_signatures([SignatureData::new(37, U256::from(1), U256::from(1))]);

        let raw = tx.rlp_encoding().unwrap();
        let decoded = FeeDelegatedChainDataAnchoring::decode(&raw).unwrap();
        prop_assert_eq!(decoded.nonce(), Some(0));
        prop_assert_eq!(decoded.gas(), 0);
        prop_assert_eq!(decoded.gas_price(), Some(U256::ZERO));
    }

    #[test]
    fn prop_other_tags_always_fail(tx in arb_tx(), tag in any::<u8>()) {
        prop_assume!(tag != tx_type::FEE_DELEGATED_CHAIN_DATA_ANCHORING);
        let mut raw = tx.rlp_encoding().unwrap().to_vec();
        raw[0] = tag;

        let err = FeeDelegatedChainDataAnchoring::decode(&raw).unwrap_err();
        prop_assert_eq!(
            err,
            TxError::TypeTagMismatch {
                expected: tx_type::FEE_DELEGATED_CHAIN_DATA_ANCHORING,
                found: tag,
            }
        );
        prop_assert!(TxEnvelope::decode(&raw).is_err());
    }

    #[test]
    fn prop_decode_never_panics(raw in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = TxEnvelope::decode(&raw);
    }
}
