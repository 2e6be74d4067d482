use bls::PublicKeyBytes;
use serde::Serialize;

use crate::{
    phase0::primitives::{Epoch, ExecutionBlockHash, Gwei, Slot, ValidatorIndex, Version, H256},
    serde_utils,
};

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct Fork {
    pub previous_version: Version,
    pub current_version: Version,
    #[serde(with = "serde_utils::u64_string")]
    pub epoch: Epoch,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct Checkpoint {
    #[serde(with = "serde_utils::u64_string")]
    pub epoch: Epoch,
    pub root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct BeaconBlockHeader {
    #[serde(with = "serde_utils::u64_string")]
    pub slot: Slot,
    #[serde(with = "serde_utils::u64_string")]
    pub proposer_index: ValidatorIndex,
    pub parent_root: H256,
    pub state_root: H256,
    pub body_root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct Eth1Data {
    pub deposit_root: H256,
    #[serde(with = "serde_utils::u64_string")]
    pub deposit_count: u64,
    pub block_hash: ExecutionBlockHash,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct Validator {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: H256,
    #[serde(with = "serde_utils::u64_string")]
    pub effective_balance: Gwei,
    pub slashed: bool,
    #[serde(with = "serde_utils::u64_string")]
    pub activation_eligibility_epoch: Epoch,
    #[serde(with = "serde_utils::u64_string")]
    pub activation_epoch: Epoch,
    #[serde(with = "serde_utils::u64_string")]
    pub exit_epoch: Epoch,
    #[serde(with = "serde_utils::u64_string")]
    pub withdrawable_epoch: Epoch,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct AttestationData {
    #[serde(with = "serde_utils::u64_string")]
    pub slot: Slot,
    #[serde(with = "serde_utils::u64_string")]
    pub index: u64,
    pub beacon_block_root: H256,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

/// Only present in Phase 0 states. Genesis states carry empty lists of
/// these, but the shape still has to serialize.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize)]
pub struct PendingAttestation {
    #[serde(with = "serde_utils::hex_bytes")]
    pub aggregation_bits: Vec<u8>,
    pub data: AttestationData,
    #[serde(with = "serde_utils::u64_string")]
    pub inclusion_delay: Slot,
    #[serde(with = "serde_utils::u64_string")]
    pub proposer_index: ValidatorIndex,
}
