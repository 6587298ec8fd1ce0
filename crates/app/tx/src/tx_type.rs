//! Type tags of the Klaytn transaction family.
//!
//! Each base type `T` comes in three flavours: `T` itself, fee-delegated `T + 1`
//! and fee-delegated with a fee ratio `T + 2`. The tag is the first byte of the
//! raw transaction and also the first element of the signing payload.

pub const LEGACY: u8 = 0x00;

pub const VALUE_TRANSFER: u8 = 0x08;
pub const FEE_DELEGATED_VALUE_TRANSFER: u8 = 0x09;
pub const FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO: u8 = 0x0a;

pub const VALUE_TRANSFER_MEMO: u8 = 0x10;
pub const FEE_DELEGATED_VALUE_TRANSFER_MEMO: u8 = 0x11;
pub const FEE_DELEGATED_VALUE_TRANSFER_MEMO_WITH_RATIO: u8 = 0x12;

pub const ACCOUNT_UPDATE: u8 = 0x20;
pub const FEE_DELEGATED_ACCOUNT_UPDATE: u8 = 0x21;
pub const FEE_DELEGATED_ACCOUNT_UPDATE_WITH_RATIO: u8 = 0x22;

pub const SMART_CONTRACT_DEPLOY: u8 = 0x28;
pub const FEE_DELEGATED_SMART_CONTRACT_DEPLOY: u8 = 0x29;
pub const FEE_DELEGATED_SMART_CONTRACT_DEPLOY_WITH_RATIO: u8 = 0x2a;

pub const SMART_CONTRACT_EXECUTION: u8 = 0x30;
pub const FEE_DELEGATED_SMART_CONTRACT_EXECUTION: u8 = 0x31;
pub const FEE_DELEGATED_SMART_CONTRACT_EXECUTION_WITH_RATIO: u8 = 0x32;

pub const CANCEL: u8 = 0x38;
pub const FEE_DELEGATED_CANCEL: u8 = 0x39;
pub const FEE_DELEGATED_CANCEL_WITH_RATIO: u8 = 0x3a;

pub const CHAIN_DATA_ANCHORING: u8 = 0x48;
pub const FEE_DELEGATED_CHAIN_DATA_ANCHORING: u8 = 0x49;
pub const FEE_DELEGATED_CHAIN_DATA_ANCHORING_WITH_RATIO: u8 = 0x4a;

/// Name of a known tag.
pub const fn name(tag: u8) -> Option<&'static str> {
    let name = match tag {
        LEGACY => "TxTypeLegacyTransaction",
        VALUE_TRANSFER => "TxTypeValueTransfer",
        FEE_DELEGATED_VALUE_TRANSFER => "TxTypeFeeDelegatedValueTransfer",
        FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO => "TxTypeFeeDelegatedValueTransferWithRatio",
        VALUE_TRANSFER_MEMO => "TxTypeValueTransferMemo",
        FEE_DELEGATED_VALUE_TRANSFER_MEMO => "TxTypeFeeDelegatedValueTransferMemo",
        FEE_DELEGATED_VALUE_TRANSFER_MEMO_WITH_RATIO => {
            "TxTypeFeeDelegatedValueTransferMemoWithRatio"
        }
        ACCOUNT_UPDATE => "TxTypeAccountUpdate",
        FEE_DELEGATED_ACCOUNT_UPDATE => "TxTypeFeeDelegatedAccountUpdate",
        FEE_DELEGATED_ACCOUNT_UPDATE_WITH_RATIO => "TxTypeFeeDelegatedAccountUpdateWithRatio",
        SMART_CONTRACT_DEPLOY => "TxTypeSmartContractDeploy",
        FEE_DELEGATED_SMART_CONTRACT_DEPLOY => "TxTypeFeeDelegatedSmartContractDeploy",
        FEE_DELEGATED_SMART_CONTRACT_DEPLOY_WITH_RATIO => {
            "TxTypeFeeDelegatedSmartContractDeployWithRatio"
        }
        SMART_CONTRACT_EXECUTION => "TxTypeSmartContractExecution",
        FEE_DELEGATED_SMART_CONTRACT_EXECUTION => "TxTypeFeeDelegatedSmartContractExecution",
        FEE_DELEGATED_SMART_CONTRACT_EXECUTION_WITH_RATIO => {
            "TxTypeFeeDelegatedSmartContractExecutionWithRatio"
        }
        CANCEL => "TxTypeCancel",
        FEE_DELEGATED_CANCEL => "TxTypeFeeDelegatedCancel",
        FEE_DELEGATED_CANCEL_WITH_RATIO => "TxTypeFeeDelegatedCancelWithRatio",
        CHAIN_DATA_ANCHORING => "TxTypeChainDataAnchoring",
        FEE_DELEGATED_CHAIN_DATA_ANCHORING => "TxTypeFeeDelegatedChainDataAnchoring",
        FEE_DELEGATED_CHAIN_DATA_ANCHORING_WITH_RATIO => {
            "TxTypeFeeDelegatedChainDataAnchoringWithRatio"
        }
        _ => return None,
    };
    Some(name)
}

/// True if `tag` belongs to the family.
pub const fn is_known(tag: u8) -> bool {
    name(tag).is_some()
}

/// True for fee-delegated tags, with or without a fee ratio.
pub const fn is_fee_delegated(tag: u8) -> bool {
    tag != LEGACY && is_known(tag) && tag % 8 != 0
}

/// True for fee-delegated tags that carry a fee ratio.
pub const fn has_fee_ratio(tag: u8) -> bool {
    tag != LEGACY && is_known(tag) && tag % 8 == 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_unique() {
        let mut named: Vec<u8> = (0..=u8::MAX).filter(|tag| is_known(*tag)).collect();
        let total = named.len();
        named.dedup();
        assert_eq!(named.len(), total);
        assert_eq!(total, 22);
    }

    #[test]
    fn test_fee_delegation_flavours() {
        assert!(!is_fee_delegated(CHAIN_DATA_ANCHORING));
        assert!(is_fee_delegated(FEE_DELEGATED_CHAIN_DATA_ANCHORING));
        assert!(!has_fee_ratio(FEE_DELEGATED_CHAIN_DATA_ANCHORING));
        assert!(has_fee_ratio(FEE_DELEGATED_CHAIN_DATA_ANCHORING_WITH_RATIO));
        assert!(!is_fee_delegated(LEGACY));
        assert!(!is_fee_delegated(0x49 + 8));
    }

    #[test]
    fn test_names() {
        assert_eq!(
            name(FEE_DELEGATED_CHAIN_DATA_ANCHORING),
            Some("TxTypeFeeDelegatedChainDataAnchoring")
        );
        assert_eq!(name(0x7f), None);
    }
}
