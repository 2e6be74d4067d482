use crate::{
    deneb::{beacon_state::BeaconState, containers::ExecutionPayloadHeader},
    phase0::containers::{BeaconBlockHeader, Checkpoint, Eth1Data, Fork},
    ssz_buffer::SszBuffer,
};

impl ExecutionPayloadHeader {
    pub fn ssz_size(&self) -> usize {
        self.fixed_size() + self.extra_data.len()
    }

    fn fixed_size(&self) -> usize {
        32 + 20
            + 32
            + 32
            + self.logs_bloom.len()
            + 32
            + 8
            + 8
            + 8
            + 8
            + 4
            + 32
            + 32
            + 32
            + 32
            + 8
            + 8
    }

    pub fn write_ssz(&self, out: &mut Vec<u8>) {
        let mut buffer = SszBuffer::new(self.fixed_size());

        buffer.write_fixed(self.parent_hash.as_bytes());
        buffer.write_fixed(self.fee_recipient.as_bytes());
        buffer.write_fixed(self.state_root.as_bytes());
        buffer.write_fixed(self.receipts_root.as_bytes());
        buffer.write_fixed(&self.logs_bloom);
        buffer.write_fixed(self.prev_randao.as_bytes());
        buffer.write_u64(self.block_number);
        buffer.write_u64(self.gas_limit);
        buffer.write_u64(self.gas_used);
        buffer.write_u64(self.timestamp);

        let extra_data = &self.extra_data;
        buffer.write_variable(|heap| heap.extend_from_slice(extra_data));

        buffer.write_fixed(&self.base_fee_per_gas.to_little_endian());
        buffer.write_fixed(self.block_hash.as_bytes());
        buffer.write_fixed(self.transactions_root.as_bytes());
        buffer.write_fixed(self.withdrawals_root.as_bytes());
        buffer.write_u64(self.blob_gas_used);
        buffer.write_u64(self.excess_blob_gas);

        out.extend_from_slice(&buffer.finish());
    }
}

impl BeaconState {
    pub fn to_ssz(&self) -> Vec<u8> {
        let fixed_length = 8
            + 32
            + 8
            + Fork::SIZE
            + BeaconBlockHeader::SIZE
            + 32 * self.block_roots.len()
            + 32 * self.state_roots.len()
            + 4
            + Eth1Data::SIZE
            + 4
            + 8
            + 4
            + 4
            + 32 * self.randao_mixes.len()
            + 8 * self.slashings.len()
            + 4
            + 4
            + 1
            + 3 * Checkpoint::SIZE
            + 4
            + self.current_sync_committee.ssz_size()
            + self.next_sync_committee.ssz_size()
            + 4
            + 8
            + 8
            + 4;

        let mut buffer = SszBuffer::new(fixed_length);

        buffer.write_u64(self.genesis_time);
        buffer.write_fixed(self.genesis_validators_root.as_bytes());
        buffer.write_u64(self.slot);

        let mut fixed = Vec::new();
        self.fork.write_ssz(&mut fixed);
        self.latest_block_header.write_ssz(&mut fixed);
        buffer.write_fixed(&fixed);

        for root in &self.block_roots {
            buffer.write_fixed(root.as_bytes());
        }

        for root in &self.state_roots {
            buffer.write_fixed(root.as_bytes());
        }

        let historical_roots = &self.historical_roots;
        buffer.write_variable(|heap| {
            for root in historical_roots {
                heap.extend_from_slice(root.as_bytes());
            }
        });

        let mut eth1_data = Vec::with_capacity(Eth1Data::SIZE);
        self.eth1_data.write_ssz(&mut eth1_data);
        buffer.write_fixed(&eth1_data);

        let eth1_data_votes = &self.eth1_data_votes;
        buffer.write_variable(|heap| {
            for vote in eth1_data_votes {
                vote.write_ssz(heap);
            }
        });

        buffer.write_u64(self.eth1_deposit_index);

        let validators = &self.validators;
        buffer.write_variable(|heap| {
            for validator in validators {
                validator.write_ssz(heap);
            }
        });

        let balances = &self.balances;
        buffer.write_variable(|heap| {
            for balance in balances {
                heap.extend_from_slice(&balance.to_le_bytes());
            }
        });

        for mix in &self.randao_mixes {
            buffer.write_fixed(mix.as_bytes());
        }

        for slashing in &self.slashings {
            buffer.write_fixed(&slashing.to_le_bytes());
        }

        let previous_epoch_participation = &self.previous_epoch_participation;
        buffer.write_variable(|heap| heap.extend_from_slice(previous_epoch_participation));

        let current_epoch_participation = &self.current_epoch_participation;
        buffer.write_variable(|heap| heap.extend_from_slice(current_epoch_participation));

        buffer.write_fixed(&self.justification_bits);

        let mut checkpoints = Vec::with_capacity(3 * Checkpoint::SIZE);
        self.previous_justified_checkpoint.write_ssz(&mut checkpoints);
        self.current_justified_checkpoint.write_ssz(&mut checkpoints);
        self.finalized_checkpoint.write_ssz(&mut checkpoints);
        buffer.write_fixed(&checkpoints);

        let inactivity_scores = &self.inactivity_scores;
        buffer.write_variable(|heap| {
            for score in inactivity_scores {
                heap.extend_from_slice(&score.to_le_bytes());
            }
        });

        self.current_sync_committee.write_ssz(buffer.fixed_mut());
        self.next_sync_committee.write_ssz(buffer.fixed_mut());

        let latest_execution_payload_header = &self.latest_execution_payload_header;
        buffer.write_variable(|heap| latest_execution_payload_header.write_ssz(heap));

        buffer.write_u64(self.next_withdrawal_index);
        buffer.write_u64(self.next_withdrawal_validator_index);

        let historical_summaries = &self.historical_summaries;
        buffer.write_variable(|heap| {
            for summary in historical_summaries {
                summary.write_ssz(heap);
            }
        });

        buffer.finish()
    }
}
