use serde::Serialize;

use crate::{
    phase0::primitives::{
        ExecutionAddress, ExecutionBlockHash, ExecutionBlockNumber, Gwei, ValidatorIndex,
        WithdrawalIndex, H256,
    },
    serde_utils,
};

/// The Capella execution payload header. Extends the Bellatrix shape with
/// `withdrawals_root` and keeps the little-endian `base_fee_per_gas` bytes.
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
    pub withdrawals_root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct Withdrawal {
    #[serde(with = "serde_utils::u64_string")]
    pub index: WithdrawalIndex,
    #[serde(with = "serde_utils::u64_string")]
    pub validator_index: ValidatorIndex,
    pub address: ExecutionAddress,
    #[serde(with = "serde_utils::u64_string")]
    pub amount: Gwei,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct HistoricalSummary {
    pub block_summary_root: H256,
    pub state_summary_root: H256,
}
