use fixed_hash::construct_fixed_hash;
use impl_serde::impl_fixed_hash_serde;

pub use ethereum_types::{H160, H256, U256};

construct_fixed_hash! {
    /// A 4-byte value: fork versions and domain types.
    pub struct H32(4);
}

impl_fixed_hash_serde!(H32, 4);

pub type DomainType = H32;
pub type Epoch = u64;
pub type ExecutionAddress = H160;
pub type ExecutionBlockHash = H256;
pub type ExecutionBlockNumber = u64;
pub type Gwei = u64;
pub type Slot = u64;
pub type UnixSeconds = u64;
pub type ValidatorIndex = u64;
pub type Version = H32;
pub type WithdrawalIndex = u64;
