use ssz::{Error as SszError, Hasher};

use crate::{
    phase0::{
        beacon_state::BeaconState,
        containers::{
            AttestationData, BeaconBlockHeader, Checkpoint, Eth1Data, Fork, PendingAttestation,
            Validator,
        },
        consts::VALIDATOR_SIZE,
    },
    ssz_buffer::SszBuffer,
};

impl Fork {
    pub const SIZE: usize = 16;

    pub fn write_ssz(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.previous_version.as_bytes());
        out.extend_from_slice(self.current_version.as_bytes());
        out.extend_from_slice(&self.epoch.to_le_bytes());
    }
}

impl Checkpoint {
    pub const SIZE: usize = 40;

    pub fn write_ssz(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.epoch.to_le_bytes());
        out.extend_from_slice(self.root.as_bytes());
    }
}

impl BeaconBlockHeader {
    pub const SIZE: usize = 112;

    pub fn write_ssz(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.slot.to_le_bytes());
        out.extend_from_slice(&self.proposer_index.to_le_bytes());
        out.extend_from_slice(self.parent_root.as_bytes());
        out.extend_from_slice(self.state_root.as_bytes());
        out.extend_from_slice(self.body_root.as_bytes());
    }
}

impl Eth1Data {
    pub const SIZE: usize = 72;

    pub fn write_ssz(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.deposit_root.as_bytes());
        out.extend_from_slice(&self.deposit_count.to_le_bytes());
        out.extend_from_slice(self.block_hash.as_bytes());
    }
}

impl Validator {
    pub const SIZE: usize = VALIDATOR_SIZE;

    pub fn write_ssz(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.pubkey.as_bytes());
        out.extend_from_slice(self.withdrawal_credentials.as_bytes());
        out.extend_from_slice(&self.effective_balance.to_le_bytes());
        out.push(self.slashed.into());
        out.extend_from_slice(&self.activation_eligibility_epoch.to_le_bytes());
        out.extend_from_slice(&self.activation_epoch.to_le_bytes());
        out.extend_from_slice(&self.exit_epoch.to_le_bytes());
        out.extend_from_slice(&self.withdrawable_epoch.to_le_bytes());
    }

    /// Appends this validator's hash-tree-root to `hasher` as one chunk.
    pub fn hash_to(&self, hasher: &mut Hasher) -> Result<(), SszError> {
        let start = hasher.index();

        hasher.put_bytes(self.pubkey.as_bytes());
        hasher.put_root(self.withdrawal_credentials);
        hasher.put_u64(self.effective_balance);
        hasher.put_u8(self.slashed.into());
        hasher.put_u64(self.activation_eligibility_epoch);
        hasher.put_u64(self.activation_epoch);
        hasher.put_u64(self.exit_epoch);
        hasher.put_u64(self.withdrawable_epoch);

        hasher.merkleize(start)
    }
}

impl AttestationData {
    pub const SIZE: usize = 128;

    pub fn write_ssz(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.slot.to_le_bytes());
        out.extend_from_slice(&self.index.to_le_bytes());
        out.extend_from_slice(self.beacon_block_root.as_bytes());
        self.source.write_ssz(out);
        self.target.write_ssz(out);
    }
}

impl PendingAttestation {
    const FIXED_SIZE: usize = 4 + AttestationData::SIZE + 8 + 8;

    pub fn write_ssz(&self, out: &mut Vec<u8>) {
        let mut buffer = SszBuffer::new(Self::FIXED_SIZE);

        let aggregation_bits = &self.aggregation_bits;
        buffer.write_variable(|heap| heap.extend_from_slice(aggregation_bits));

        let mut data = Vec::with_capacity(AttestationData::SIZE);
        self.data.write_ssz(&mut data);
        buffer.write_fixed(&data);

        buffer.write_u64(self.inclusion_delay);
        buffer.write_u64(self.proposer_index);

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
            + 3 * Checkpoint::SIZE;

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

        let previous_epoch_attestations = &self.previous_epoch_attestations;
        buffer.write_variable(|heap| {
            write_pending_attestations(heap, previous_epoch_attestations);
        });

        let current_epoch_attestations = &self.current_epoch_attestations;
        buffer.write_variable(|heap| {
            write_pending_attestations(heap, current_epoch_attestations);
        });

        buffer.write_fixed(&self.justification_bits);

        let mut checkpoints = Vec::with_capacity(3 * Checkpoint::SIZE);
        self.previous_justified_checkpoint.write_ssz(&mut checkpoints);
        self.current_justified_checkpoint.write_ssz(&mut checkpoints);
        self.finalized_checkpoint.write_ssz(&mut checkpoints);
        buffer.write_fixed(&checkpoints);

        buffer.finish()
    }
}

// Pending attestations are themselves variable-size, so the list is encoded
// as an offset table followed by the elements.
fn write_pending_attestations(out: &mut Vec<u8>, attestations: &[PendingAttestation]) {
    let mut encoded = Vec::new();
    let mut offsets = Vec::with_capacity(4 * attestations.len());
    let table_length = 4 * attestations.len();

    for attestation in attestations {
        let offset = u32::try_from(table_length + encoded.len()).expect("SSZ offset fits in u32");
        offsets.extend_from_slice(&offset.to_le_bytes());
        attestation.write_ssz(&mut encoded);
    }

    out.extend_from_slice(&offsets);
    out.extend_from_slice(&encoded);
}

#[cfg(test)]
mod tests {
    use bls::PublicKeyBytes;
    use hex_literal::hex;

    use crate::phase0::primitives::H256;

    use super::*;

    fn sample_validator() -> Validator {
        Validator {
            pubkey: PublicKeyBytes::repeat_byte(1),
            withdrawal_credentials: H256::repeat_byte(1),
            effective_balance: 32_000_000_000,
            slashed: false,
            activation_eligibility_epoch: 0,
            activation_epoch: 0,
            exit_epoch: u64::MAX,
            withdrawable_epoch: u64::MAX,
        }
    }

    #[test]
    fn validators_serialize_to_121_bytes() {
        let mut bytes = Vec::new();
        sample_validator().write_ssz(&mut bytes);

        assert_eq!(bytes.len(), Validator::SIZE);
        assert_eq!(bytes[48 + 32 + 8], 0, "slashed flag");
        assert_eq!(bytes[bytes.len() - 8..], [0xff; 8], "withdrawable epoch");
    }

    #[test]
    fn validator_roots_match_the_reference_merkleization() {
        let root = ssz::hash_with(|hasher| {
            sample_validator().hash_to(hasher)?;
            Ok(())
        })
        .expect("hashing a validator cannot fail");

        assert_eq!(
            root,
            H256(hex!(
                "5ab8e16430dfc7e4dfb70e14523a9708edd4d326fd975cdde89c4c86aba174e1"
            )),
        );
    }

    #[test]
    fn empty_phase0_state_has_the_minimal_fixed_layout() {
        let state = BeaconState::default();
        let bytes = state.to_ssz();

        // Every vector is empty, so the output is the fixed part plus
        // nothing: 8 + 32 + 8 + 16 + 112 + 4 + 72 + 4 + 8 + 4 + 4 + 4 + 4
        // + 1 + 120 bytes of offsets, scalars and embedded containers.
        assert_eq!(bytes.len(), 401);
    }
}
