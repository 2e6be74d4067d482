use alloy_genesis::Genesis;
use anyhow::Result;
use eth1::ExecutionBlock;
use types::{combined::BeaconState, config::Config, electra, nonstandard::Phase};
use validators::Validator as InputValidator;

use crate::{
    builders::BuilderParts, payload_header::deneb_header, serialize::ContentType,
    sync_committee::get_genesis_sync_committee, GenesisBuilder,
};

pub(crate) struct ElectraBuilder {
    parts: BuilderParts,
}

impl ElectraBuilder {
    pub fn new(el_genesis: Genesis, config: Config) -> Self {
        Self {
            parts: BuilderParts::new(el_genesis, config),
        }
    }
}

impl GenesisBuilder for ElectraBuilder {
    fn set_shadow_fork_block(&mut self, block: ExecutionBlock) {
        self.parts.set_shadow_fork_block(block);
    }

    fn add_validators(&mut self, validators: Vec<InputValidator>) {
        self.parts.add_validators(validators);
    }

    fn build_state(&self) -> Result<BeaconState> {
        let common = self.parts.common(Phase::Electra)?;

        // The payload header keeps the Deneb shape in Electra.
        let execution_payload_header = deneb_header(&common.genesis_block, self.parts.specs())?;

        let sync_committee = get_genesis_sync_committee(
            self.parts.specs(),
            &common.validators,
            common.genesis_block_hash,
        )?;

        Ok(BeaconState::Electra(electra::beacon_state::BeaconState {
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
            deposit_requests_start_index: 0,
            deposit_balance_to_consume: 0,
            exit_balance_to_consume: 0,
            earliest_exit_epoch: 0,
            consolidation_balance_to_consume: 0,
            earliest_consolidation_epoch: 0,
            pending_deposits: vec![],
            pending_partial_withdrawals: vec![],
            pending_consolidations: vec![],
            block_roots: common.block_roots,
            state_roots: common.state_roots,
            randao_mixes: common.randao_mixes,
            slashings: common.slashings,
            validators: common.validators,
            balances: common.balances,
        }))
    }

    fn serialize(&self, state: &BeaconState, content_type: ContentType) -> Result<Vec<u8>> {
        self.parts.serialize_checked(state, Phase::Electra, content_type)
    }
}
