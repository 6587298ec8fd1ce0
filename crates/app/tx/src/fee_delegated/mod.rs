//! Fee-delegated transaction types.

pub mod chain_data_anchoring;

pub use chain_data_anchoring::FeeDelegatedChainDataAnchoring;
