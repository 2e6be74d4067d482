//! Assembly of versioned beacon genesis states from an execution-layer
//! genesis, a consensus configuration and a set of initial validators.

use alloy_genesis::Genesis;
use anyhow::Result;
use eth1::ExecutionBlock;
use thiserror::Error;
use types::{combined::BeaconState, config::Config, nonstandard::Phase};
use validators::Validator as InputValidator;

pub use crate::{
    fork::{genesis_phase, state_fork},
    roots::{
        compute_deposit_root, compute_transactions_root, compute_withdrawals_root,
        seed_randao_mixes,
    },
    serialize::{serialize_state, ContentType},
    sync_committee::get_genesis_sync_committee,
    validator_registry::{get_genesis_balances, get_genesis_validators},
};

mod body_root;
mod builders;
mod common;
mod fork;
mod payload_header;
mod roots;
mod serialize;
mod sync_committee;
mod validator_registry;

/// A fork-specific genesis-state assembler. One variant exists per fork;
/// [`new_genesis_builder`] picks the one the configuration activates at
/// epoch 0.
pub trait GenesisBuilder {
    /// Replaces the derived EL genesis block with an arbitrary execution
    /// block, turning the output into a shadow-fork genesis.
    fn set_shadow_fork_block(&mut self, block: ExecutionBlock);

    /// Appends genesis validators. May be called multiple times.
    fn add_validators(&mut self, validators: Vec<InputValidator>);

    /// Assembles the versioned beacon state.
    fn build_state(&self) -> Result<BeaconState>;

    /// Encodes a state previously produced by this builder.
    fn serialize(&self, state: &BeaconState, content_type: ContentType) -> Result<Vec<u8>>;
}

/// Selects the builder for the highest fork active at genesis.
#[must_use]
pub fn new_genesis_builder(el_genesis: Genesis, config: Config) -> Box<dyn GenesisBuilder> {
    match genesis_phase(&config) {
        Phase::Phase0 => Box::new(builders::Phase0Builder::new(el_genesis, config)),
        Phase::Altair => Box::new(builders::AltairBuilder::new(el_genesis, config)),
        Phase::Bellatrix => Box::new(builders::BellatrixBuilder::new(el_genesis, config)),
        Phase::Capella => Box::new(builders::CapellaBuilder::new(el_genesis, config)),
        Phase::Deneb => Box::new(builders::DenebBuilder::new(el_genesis, config)),
        Phase::Electra => Box::new(builders::ElectraBuilder::new(el_genesis, config)),
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("extra data is {length} bytes, max is 32")]
    ExtraDataTooLong { length: usize },
    #[error("transactions list is too long ({count} > {maximum})")]
    TooManyTransactions { count: u64, maximum: u64 },
    #[error("transaction {index} is too long")]
    TransactionTooLong { index: usize },
    #[error("withdrawals list is too long ({count} > {maximum})")]
    TooManyWithdrawals { count: u64, maximum: u64 },
    #[error("no active validators to select a sync committee from")]
    NoActiveValidators,
    #[error("sync-committee candidate {validator_index} has an invalid public key")]
    InvalidCommitteePublicKey { validator_index: u64 },
    #[error("failed to aggregate sync-committee public keys")]
    AggregationFailed,
    #[error("{field} is missing or not a 4-byte value")]
    MissingForkVersion { field: &'static str },
    #[error("DOMAIN_SYNC_COMMITTEE is not a 4-byte value")]
    InvalidDomainType,
    #[error("execution-layer block has missing {field} field")]
    MissingBlockField { field: &'static str },
    #[error("built a {built} state but this builder serializes {expected} states")]
    UnsupportedStateVariant { built: Phase, expected: Phase },
    #[error("validator registry length {count} exceeds VALIDATOR_REGISTRY_LIMIT {limit}")]
    RegistryLimitExceeded { count: usize, limit: u64 },
}
