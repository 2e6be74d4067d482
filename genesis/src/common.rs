use alloy_genesis::Genesis;
use anyhow::Result;
use eth1::ExecutionBlock;
use types::{
    config::Config,
    nonstandard::Phase,
    phase0::{
        containers::{BeaconBlockHeader, Checkpoint, Eth1Data, Fork, Validator},
        primitives::{Gwei, UnixSeconds, H256},
    },
    specs::Specs,
};
use validators::Validator as InputValidator;

use crate::{
    body_root::empty_body_root,
    fork::state_fork,
    payload_header::h256,
    roots::{compute_deposit_root, seed_randao_mixes},
    validator_registry::{get_genesis_balances, get_genesis_validators},
    Error,
};

/// Everything every state variant shares, computed once per build.
pub(crate) struct CommonFields {
    pub genesis_block: ExecutionBlock,
    pub genesis_block_hash: H256,
    pub genesis_time: UnixSeconds,
    pub genesis_validators_root: H256,
    pub validators: Vec<Validator>,
    pub balances: Vec<Gwei>,
    pub deposit_root: H256,
    pub body_root: H256,
    pub fork: Fork,
    pub block_roots: Vec<H256>,
    pub state_roots: Vec<H256>,
    pub randao_mixes: Vec<H256>,
    pub slashings: Vec<Gwei>,
}

pub(crate) fn assemble_common(
    config: &Config,
    specs: &Specs,
    el_genesis: &Genesis,
    shadow_fork_block: Option<&ExecutionBlock>,
    input_validators: &[InputValidator],
    phase: Phase,
) -> Result<CommonFields> {
    let genesis_block = shadow_fork_block
        .cloned()
        .unwrap_or_else(|| eth1::genesis_to_block(el_genesis));

    if genesis_block.extra_data.len() > 32 {
        return Err(Error::ExtraDataTooLong {
            length: genesis_block.extra_data.len(),
        }
        .into());
    }

    let genesis_block_hash = h256(genesis_block.hash);

    let deposit_root = compute_deposit_root(specs)?;
    let body_root = empty_body_root(phase, specs)?;
    let fork = state_fork(phase, config)?;

    let (validators, genesis_validators_root) = get_genesis_validators(specs, input_validators)?;
    let balances = get_genesis_balances(specs, input_validators);

    let genesis_delay = config.get_uint_default("GENESIS_DELAY", 604_800);
    let min_genesis_time = config.get_uint_default("MIN_GENESIS_TIME", 0);
    let genesis_time = min_genesis_time.max(genesis_block.timestamp) + genesis_delay;

    let slots_per_historical_root =
        specs.get_uint_default("SLOTS_PER_HISTORICAL_ROOT", 8192) as usize;
    let epochs_per_slashings_vector =
        specs.get_uint_default("EPOCHS_PER_SLASHINGS_VECTOR", 8192) as usize;

    Ok(CommonFields {
        genesis_block_hash,
        genesis_time,
        genesis_validators_root,
        validators,
        balances,
        deposit_root,
        body_root,
        fork,
        block_roots: vec![H256::zero(); slots_per_historical_root],
        state_roots: vec![H256::zero(); slots_per_historical_root],
        randao_mixes: seed_randao_mixes(genesis_block_hash, specs),
        slashings: vec![0; epochs_per_slashings_vector],
        genesis_block,
    })
}

impl CommonFields {
    pub fn latest_block_header(&self) -> BeaconBlockHeader {
        BeaconBlockHeader {
            body_root: self.body_root,
            ..BeaconBlockHeader::default()
        }
    }

    pub fn eth1_data(&self) -> Eth1Data {
        Eth1Data {
            deposit_root: self.deposit_root,
            deposit_count: 0,
            block_hash: self.genesis_block_hash,
        }
    }

    pub fn justification_bits(&self) -> Vec<u8> {
        vec![0]
    }

    pub fn empty_checkpoint(&self) -> Checkpoint {
        Checkpoint::default()
    }

    /// Zeroed per-validator participation flags.
    pub fn participation(&self) -> Vec<u8> {
        vec![0; self.validators.len()]
    }

    /// Zeroed per-validator inactivity scores.
    pub fn inactivity_scores(&self) -> Vec<u64> {
        vec![0; self.validators.len()]
    }
}
