use serde::Serialize;

use crate::{
    phase0::primitives::{ExecutionAddress, ExecutionBlockHash, ExecutionBlockNumber, H256},
    serde_utils,
};

/// The Bellatrix execution payload header.
///
/// `base_fee_per_gas` stores the uint256 in its SSZ byte order
/// (little-endian), matching how pre-Deneb header containers are laid out.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize)]
pub struct ExecutionPayloadHeader {
    pub parent_hash: ExecutionBlockHash,
    pub fee_recipient: ExecutionAddress,
    pub state_root: H256,
    pub receipts_root: H256,
    #[serde(with = "serde_utils::hex_bytes")]
    pub logs_bloom: Vec<u8>,
    pub prev_randao: H256,
    #[serde(with = "serde_utils::u64_string")]
    pub block_number: ExecutionBlockNumber,
    #[serde(with = "serde_utils::u64_string")]
    pub gas_limit: u64,
    #[serde(with = "serde_utils::u64_string")]
    pub gas_used: u64,
    #[serde(with = "serde_utils::u64_string")]
    pub timestamp: u64,
    #[serde(with = "serde_utils::hex_bytes")]
    pub extra_data: Vec<u8>,
    #[serde(with = "serde_utils::le_uint256_string")]
    pub base_fee_per_gas: H256,
    pub block_hash: ExecutionBlockHash,
    pub transactions_root: H256,
}
