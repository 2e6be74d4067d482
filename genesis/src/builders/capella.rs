use alloy_genesis::Genesis;
use anyhow::Result;
use eth1::ExecutionBlock;
use types::{capella, combined::BeaconState, config::Config, nonstandard::Phase};
use validators::Validator as InputValidator;

use crate::{
    builders::BuilderParts, payload_header::capella_header, serialize::ContentType,
    sync_committee::get_genesis_sync_committee, GenesisBuilder,
};

pub(crate) struct CapellaBuilder {
    parts: BuilderParts,
}

impl CapellaBuilder {
    pub fn new(el_genesis: Genesis, config: Config) -> Self {
        Self {
            parts: BuilderParts::new(el_genesis, config),
        }
    }
}

impl GenesisBuilder for CapellaBuilder {
    fn set_shadow_fork_block(&mut self, block: ExecutionBlock) {
        self.parts.set_shadow_fork_block(block);
    }

    fn add_validators(&mut self, validators: Vec<InputValidator>) {
        self.parts.add_validators(validators);
    }

    fn build_state(&self) -> Result<BeaconState> {
        let common = self.parts.common(Phase::Capella)?;

        let execution_payload_header = capella_header(&common.genesis_block, self.parts.specs())?;

        let sync_committee = get_genesis_sync_committee(
            self.parts.specs(),
            &common.validators,
            common.genesis_block_hash,
        )?;

        Ok(BeaconState::Capella(capella::beacon_state::BeaconState {
            genesis_time: common.genesis_time,
            genesis_validators_root: common.genesis_validators_root,
            slot: 0,
            fork: common.fork,
            latest_block_header: common.latest_block_header(),
            eth1_data: common.eth1_data(),
            eth1_data_votes: vec![],
            eth1_deposit_index: 0,
            historical_roots: vec![],
            previous_epoch_participation: common.participation(),
            current_epoch_participation: common.participation(),
            justification_bits: common.justification_bits(),
            previous_justified_checkpoint: common.empty_checkpoint(),
            current_justified_checkpoint: common.empty_checkpoint(),
            finalized_checkpoint: common.empty_checkpoint(),
            inactivity_scores: common.inactivity_scores(),
            current_sync_committee: sync_committee.clone(),
            next_sync_committee: sync_committee,
            latest_execution_payload_header: execution_payload_header,
            next_withdrawal_index: 0,
            next_withdrawal_validator_index: 0,
            historical_summaries: vec![],
            block_roots: common.block_roots,
            state_roots: common.state_roots,
            randao_mixes: common.randao_mixes,
            slashings: common.slashings,
            validators: common.validators,
            balances: common.balances,
        }))
    }

    fn serialize(&self, state: &BeaconState, content_type: ContentType) -> Result<Vec<u8>> {
        self.parts.serialize_checked(state, Phase::Capella, content_type)
    }
}
