use anyhow::Result;
use ssz::Hasher;
use types::{nonstandard::Phase, phase0::primitives::H256, specs::Specs};

use crate::roots::empty_list;

/// Hash-tree-root of an otherwise-empty beacon block body for the given
/// fork, used as the `body_root` of the genesis state's latest block
/// header. The shape of the body and the capacities of its lists come from
/// the flattened specification; in particular the sync-aggregate bit vector
/// spans `ceil(SYNC_COMMITTEE_SIZE / 8)` bytes.
pub fn empty_body_root(phase: Phase, specs: &Specs) -> Result<H256> {
    let get = |key, default| specs.get_uint_default(key, default);

    let max_proposer_slashings = get("MAX_PROPOSER_SLASHINGS", 16);
    let (max_attester_slashings, max_attestations) = if phase >= Phase::Electra {
        (
            get("MAX_ATTESTER_SLASHINGS_ELECTRA", 1),
            get("MAX_ATTESTATIONS_ELECTRA", 8),
        )
    } else {
        (get("MAX_ATTESTER_SLASHINGS", 2), get("MAX_ATTESTATIONS", 128))
    };
    let max_deposits = get("MAX_DEPOSITS", 16);
    let max_voluntary_exits = get("MAX_VOLUNTARY_EXITS", 16);

    ssz::hash_with(|hasher| {
        let body = hasher.index();

        // randao_reveal
        hasher.put_bytes(&[0; 96]);

        // eth1_data
        let eth1_data = hasher.index();
        hasher.put_root(H256::zero());
        hasher.put_u64(0);
        hasher.put_root(H256::zero());
        hasher.merkleize(eth1_data)?;

        // graffiti
        hasher.put_root(H256::zero());

        empty_list(hasher, max_proposer_slashings)?;
        empty_list(hasher, max_attester_slashings)?;
        empty_list(hasher, max_attestations)?;
        empty_list(hasher, max_deposits)?;
        empty_list(hasher, max_voluntary_exits)?;

        if phase >= Phase::Altair {
            sync_aggregate(hasher, specs)?;
        }

        if phase >= Phase::Bellatrix {
            execution_payload(hasher, specs, phase)?;
        }

        if phase >= Phase::Capella {
            empty_list(hasher, get("MAX_BLS_TO_EXECUTION_CHANGES", 16))?;
        }

        if phase >= Phase::Deneb {
            empty_list(hasher, get("MAX_BLOB_COMMITMENTS_PER_BLOCK", 4096))?;
        }

        if phase >= Phase::Electra {
            execution_requests(hasher, specs)?;
        }

        hasher.merkleize(body)?;
        Ok(())
    })
}

fn sync_aggregate(hasher: &mut Hasher, specs: &Specs) -> Result<(), ssz::Error> {
    let sync_committee_size = specs.get_uint_default("SYNC_COMMITTEE_SIZE", 512);
    let mask_bytes = sync_committee_size.div_ceil(8);

    let aggregate = hasher.index();

    // sync_committee_bits
    let bits = hasher.index();
    hasher.append_bytes32(&vec![0; mask_bytes as usize]);
    hasher.merkleize(bits)?;

    // sync_committee_signature
    hasher.put_bytes(&[0; 96]);

    hasher.merkleize(aggregate)
}

fn execution_payload(hasher: &mut Hasher, specs: &Specs, phase: Phase) -> Result<(), ssz::Error> {
    let bloom_bytes = specs.get_uint_default("BYTES_PER_LOGS_BLOOM", 256);
    let max_extra_data = specs.get_uint_default("MAX_EXTRA_DATA_BYTES", 32);
    let max_transactions = specs.get_uint_default("MAX_TRANSACTIONS_PER_PAYLOAD", 1_048_576);
    let max_withdrawals = specs.get_uint_default("MAX_WITHDRAWALS_PER_PAYLOAD", 16);

    let payload = hasher.index();

    hasher.put_root(H256::zero()); // parent_hash
    hasher.put_bytes(&[0; 20]); // fee_recipient
    hasher.put_root(H256::zero()); // state_root
    hasher.put_root(H256::zero()); // receipts_root

    let bloom = hasher.index();
    hasher.append_bytes32(&vec![0; bloom_bytes as usize]);
    hasher.merkleize(bloom)?;

    hasher.put_root(H256::zero()); // prev_randao
    hasher.put_u64(0); // block_number
    hasher.put_u64(0); // gas_limit
    hasher.put_u64(0); // gas_used
    hasher.put_u64(0); // timestamp

    // extra_data is a byte list, so its capacity is in chunks.
    empty_list(hasher, ssz::chunks_for_byte_limit(max_extra_data))?;

    hasher.put_root(H256::zero()); // base_fee_per_gas
    hasher.put_root(H256::zero()); // block_hash

    empty_list(hasher, max_transactions)?;

    if phase >= Phase::Capella {
        empty_list(hasher, max_withdrawals)?;
    }

    if phase >= Phase::Deneb {
        hasher.put_u64(0); // blob_gas_used
        hasher.put_u64(0); // excess_blob_gas
    }

    hasher.merkleize(payload)
}

fn execution_requests(hasher: &mut Hasher, specs: &Specs) -> Result<(), ssz::Error> {
    let requests = hasher.index();

    empty_list(hasher, specs.get_uint_default("MAX_DEPOSIT_REQUESTS_PER_PAYLOAD", 8192))?;
    empty_list(
        hasher,
        specs.get_uint_default("MAX_WITHDRAWAL_REQUESTS_PER_PAYLOAD", 16),
    )?;
    empty_list(
        hasher,
        specs.get_uint_default("MAX_CONSOLIDATION_REQUESTS_PER_PAYLOAD", 2),
    )?;

    hasher.merkleize(requests)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use types::config::Config;

    use super::*;

    fn preset_specs(preset: &str) -> Specs {
        let config = Config::from_yaml_str(&format!("PRESET_BASE: \"{preset}\"\n"))
            .expect("config is valid");

        Specs::from_config(&config)
    }

    #[test]
    fn phase0_body_shape_has_eight_fields() {
        let root =
            empty_body_root(Phase::Phase0, &preset_specs("mainnet")).expect("root is computable");

        assert_eq!(
            root,
            H256(hex!(
                "ccb62460692be0ec813b56be97f68a82cf57abc102e27bf49ebf4190ff22eedd"
            )),
        );
    }

    #[test]
    fn the_sync_aggregate_mask_length_follows_the_committee_size() {
        let root =
            empty_body_root(Phase::Altair, &preset_specs("mainnet")).expect("root is computable");

        assert_eq!(
            root,
            H256(hex!(
                "5bbaf31d784ad05f513489748eefa4119bbde2c8ffbc1772911e332d136c50ea"
            )),
        );

        // A 32-member committee yields a 4-byte mask and a different root.
        let root =
            empty_body_root(Phase::Altair, &preset_specs("minimal")).expect("root is computable");

        assert_eq!(
            root,
            H256(hex!(
                "0c2f0b3a25ce97551844e65999eabbfab687b67b4eff6dc2477e78364d6766c9"
            )),
        );
    }

    #[test]
    fn post_merge_bodies_grow_with_each_fork() {
        let cases = [
            (
                Phase::Bellatrix,
                hex!("cd7c49966ebe72b1214e6d4733adf6bf06935c5fbc3b3ad08e84e3085428b82f"),
            ),
            (
                Phase::Capella,
                hex!("74b4bb048d39c75f175fbb2311062eb9867d79b712907f39544fcaf2d7e1b433"),
            ),
            (
                Phase::Deneb,
                hex!("bce73ee2c617851846af2b3ea2287e3b686098e18ae508c7271aaa06ab1d06cd"),
            ),
            (
                Phase::Electra,
                hex!("867eabacb953e90557f4b44d3e14d71dc2eeb92c86d27c471920b5517266e325"),
            ),
        ];

        for (phase, expected) in cases {
            let root = empty_body_root(phase, &preset_specs("mainnet")).expect("root is computable");
            assert_eq!(root, H256(expected), "{phase}");
        }
    }
}
