use bls::{PublicKeyBytes, SignatureBytes};
use serde::Serialize;

use crate::{
    phase0::primitives::{Epoch, Gwei, Slot, ValidatorIndex, H256},
    serde_utils,
};

// Electra states carry queues of deferred stake operations. At genesis the
// queues are empty, but the shapes still serialize.

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct PendingDeposit {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: H256,
    #[serde(with = "serde_utils::u64_string")]
    pub amount: Gwei,
    pub signature: SignatureBytes,
    #[serde(with = "serde_utils::u64_string")]
    pub slot: Slot,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct PendingPartialWithdrawal {
    #[serde(with = "serde_utils::u64_string")]
    pub validator_index: ValidatorIndex,
    #[serde(with = "serde_utils::u64_string")]
    pub amount: Gwei,
    #[serde(with = "serde_utils::u64_string")]
    pub withdrawable_epoch: Epoch,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
pub struct PendingConsolidation {
    #[serde(with = "serde_utils::u64_string")]
    pub source_index: ValidatorIndex,
    #[serde(with = "serde_utils::u64_string")]
    pub target_index: ValidatorIndex,
}
