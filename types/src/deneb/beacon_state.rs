use serde::Serialize;

use crate::{
    altair::containers::SyncCommittee,
    capella::containers::HistoricalSummary,
    deneb::containers::ExecutionPayloadHeader,
    phase0::{
        containers::{BeaconBlockHeader, Checkpoint, Eth1Data, Fork, Validator},
        primitives::{Gwei, Slot, UnixSeconds, ValidatorIndex, WithdrawalIndex, H256},
    },
    serde_utils,
};

#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize)]
pub struct BeaconState {
    #[serde(with = "serde_utils::u64_string")]
    pub genesis_time: UnixSeconds,
    pub genesis_validators_root: H256,
    #[serde(with = "serde_utils::u64_string")]
    pub slot: Slot,
    pub fork: Fork,
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: Vec<H256>,
    pub state_roots: Vec<H256>,
    pub historical_roots: Vec<H256>,
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: Vec<Eth1Data>,
    #[serde(with = "serde_utils::u64_string")]
    pub eth1_deposit_index: u64,
    pub validators: Vec<Validator>,
    #[serde(with = "serde_utils::u64_string_sequence")]
    pub balances: Vec<Gwei>,
    pub randao_mixes: Vec<H256>,
    #[serde(with = "serde_utils::u64_string_sequence")]
    pub slashings: Vec<Gwei>,
    #[serde(with = "serde_utils::u8_string_sequence")]
    pub previous_epoch_participation: Vec<u8>,
    #[serde(with = "serde_utils::u8_string_sequence")]
    pub current_epoch_participation: Vec<u8>,
    #[serde(with = "serde_utils::hex_bytes")]
    pub justification_bits: Vec<u8>,
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
    #[serde(with = "serde_utils::u64_string_sequence")]
    pub inactivity_scores: Vec<u64>,
    pub current_sync_committee: SyncCommittee,
    pub next_sync_committee: SyncCommittee,
    pub latest_execution_payload_header: ExecutionPayloadHeader,
    #[serde(with = "serde_utils::u64_string")]
    pub next_withdrawal_index: WithdrawalIndex,
    #[serde(with = "serde_utils::u64_string")]
    pub next_withdrawal_validator_index: ValidatorIndex,
    pub historical_summaries: Vec<HistoricalSummary>,
}
