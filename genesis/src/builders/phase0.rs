use alloy_genesis::Genesis;
use anyhow::Result;
use eth1::ExecutionBlock;
use types::{combined::BeaconState, config::Config, nonstandard::Phase, phase0};
use validators::Validator as InputValidator;

use crate::{builders::BuilderParts, serialize::ContentType, GenesisBuilder};

pub(crate) struct Phase0Builder {
    parts: BuilderParts,
}

impl Phase0Builder {
    pub fn new(el_genesis: Genesis, config: Config) -> Self {
        Self {
            parts: BuilderParts::new(el_genesis, config),
        }
    }
}

impl GenesisBuilder for Phase0Builder {
    fn set_shadow_fork_block(&mut self, block: ExecutionBlock) {
        self.parts.set_shadow_fork_block(block);
    }

    fn add_validators(&mut self, validators: Vec<InputValidator>) {
        self.parts.add_validators(validators);
    }

    fn build_state(&self) -> Result<BeaconState> {
        let common = self.parts.common(Phase::Phase0)?;

        Ok(BeaconState::Phase0(phase0::beacon_state::BeaconState {
            genesis_time: common.genesis_time,
            genesis_validators_root: common.genesis_validators_root,
            slot: 0,
            fork: common.fork,
            latest_block_header: common.latest_block_header(),
            eth1_data: common.eth1_data(),
            eth1_data_votes: vec![],
            eth1_deposit_index: 0,
            historical_roots: vec![],
            previous_epoch_attestations: vec![],
            current_epoch_attestations: vec![],
            justification_bits: common.justification_bits(),
            previous_justified_checkpoint: common.empty_checkpoint(),
            current_justified_checkpoint: common.empty_checkpoint(),
            finalized_checkpoint: common.empty_checkpoint(),
            block_roots: common.block_roots,
            state_roots: common.state_roots,
            randao_mixes: common.randao_mixes,
            slashings: common.slashings,
            validators: common.validators,
            balances: common.balances,
        }))
    }

    fn serialize(&self, state: &BeaconState, content_type: ContentType) -> Result<Vec<u8>> {
        self.parts.serialize_checked(state, Phase::Phase0, content_type)
    }
}
