use core::num::NonZeroU64;

use anyhow::Result;
use bls::{aggregate_public_keys, PublicKey, PublicKeyBytes};
use types::{
    altair::{consts::DOMAIN_SYNC_COMMITTEE, containers::SyncCommittee},
    phase0::{containers::Validator, primitives::H256},
    specs::Specs,
};

use crate::Error;

/// Selects the genesis sync committee from the active validator set and
/// aggregates its public keys.
///
/// The committee may contain duplicate members when the active set is
/// smaller than roughly `SYNC_COMMITTEE_SIZE + 128`.
pub fn get_genesis_sync_committee(
    specs: &Specs,
    validators: &[Validator],
    randao_mix: H256,
) -> Result<SyncCommittee> {
    let active = validators
        .iter()
        .zip(0..)
        .filter(|(validator, _)| validator.activation_epoch == 0)
        .map(|(_, index)| index)
        .collect::<Vec<u64>>();

    let electra_active = specs.get_uint("ELECTRA_FORK_EPOCH") == Some(0);

    let committee_indices = if electra_active {
        compute_committee_indices::<u16>(specs, &active, validators, randao_mix)?
    } else {
        compute_committee_indices::<u8>(specs, &active, validators, randao_mix)?
    };

    let mut pubkeys = Vec::with_capacity(committee_indices.len());
    let mut decompressed = Vec::with_capacity(committee_indices.len());

    for validator_index in committee_indices {
        let pubkey = validators[validator_index as usize].pubkey;

        decompressed.push(
            PublicKey::try_from(pubkey)
                .map_err(|_| Error::InvalidCommitteePublicKey { validator_index })?,
        );
        pubkeys.push(pubkey);
    }

    let aggregate = aggregate_public_keys(&decompressed).map_err(|_| Error::AggregationFailed)?;

    Ok(SyncCommittee {
        pubkeys,
        aggregate_pubkey: PublicKeyBytes::from(aggregate),
    })
}

/// One acceptance sample of the balance-weighted selector. The sample width
/// differs across forks: single bytes before Electra, little-endian `u16`s
/// from Electra on, with the acceptance threshold scaled accordingly.
trait RandomSample: Copy + Into<u64> {
    /// Samples drawn from one 32-byte digest before rehashing.
    const PER_DIGEST: u64;
    /// The maximum sample value, used to scale the acceptance threshold.
    const MAX_VALUE: u64;

    fn take(digest: H256, position: u64) -> Self;
}

impl RandomSample for u8 {
    const PER_DIGEST: u64 = 32;
    const MAX_VALUE: u64 = 0xff;

    fn take(digest: H256, position: u64) -> Self {
        digest[position as usize]
    }
}

impl RandomSample for u16 {
    const PER_DIGEST: u64 = 16;
    const MAX_VALUE: u64 = 0xffff;

    fn take(digest: H256, position: u64) -> Self {
        let offset = (position * 2) as usize;
        Self::from_le_bytes([digest[offset], digest[offset + 1]])
    }
}

fn compute_committee_indices<S: RandomSample>(
    specs: &Specs,
    active: &[u64],
    validators: &[Validator],
    randao_mix: H256,
) -> Result<Vec<u64>, Error> {
    let committee_size = specs.get_uint_default("SYNC_COMMITTEE_SIZE", 512);
    let shuffle_round_count = specs.get_uint_default("SHUFFLE_ROUND_COUNT", 90);
    let max_effective_balance = specs.get_uint_default("MAX_EFFECTIVE_BALANCE", 32_000_000_000);
    let domain = specs.get_bytes_default("DOMAIN_SYNC_COMMITTEE", &DOMAIN_SYNC_COMMITTEE);
    let domain = <[u8; 4]>::try_from(domain).map_err(|_| Error::InvalidDomainType)?;

    let active_count =
        NonZeroU64::new(active.len() as u64).ok_or(Error::NoActiveValidators)?;

    // Truncation matches the reference behavior of passing the configured
    // round count into the single-index shuffle.
    #[allow(clippy::cast_possible_truncation)]
    let rounds = shuffle_round_count as u8;

    let seed = compute_genesis_seed(randao_mix, 0, domain);

    let mut committee = Vec::with_capacity(committee_size as usize);
    let mut digest = H256::zero();

    for attempt in 0.. {
        if committee.len() as u64 >= committee_size {
            break;
        }

        let shuffled = shuffling::permute_index(rounds, attempt % active_count, active_count, seed);
        let candidate = active[shuffled as usize];
        let effective_balance = validators[candidate as usize].effective_balance;

        if attempt % S::PER_DIGEST == 0 {
            digest = hashing::hash_256_64(seed, attempt / S::PER_DIGEST);
        }

        let sample = S::take(digest, attempt % S::PER_DIGEST).into();

        if effective_balance * S::MAX_VALUE >= max_effective_balance * sample {
            committee.push(candidate);
        }
    }

    Ok(committee)
}

/// `sha256(domain_type ‖ uint_to_bytes(epoch) ‖ mix)`.
fn compute_genesis_seed(mix: H256, epoch: u64, domain_type: [u8; 4]) -> H256 {
    hashing::hash_32_64_256(domain_type, epoch, mix)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use types::config::Config;

    use super::*;

    const RANDAO_MIX: H256 = H256(hex!(
        "4ff6f743a43f3b4f95350831aeaf0a122a1a392922c45d804280284a69eb850b"
    ));

    fn specs(electra_fork_epoch: u64) -> Specs {
        let config = Config::from_yaml_str(&format!(
            "PRESET_BASE: \"minimal\"\n\
             SYNC_COMMITTEE_SIZE: 32\n\
             SHUFFLE_ROUND_COUNT: 10\n\
             MAX_EFFECTIVE_BALANCE: 32000000000\n\
             DOMAIN_SYNC_COMMITTEE: \"0x07000000\"\n\
             ELECTRA_FORK_EPOCH: {electra_fork_epoch}\n",
        ))
        .expect("config is valid");

        Specs::from_config(&config)
    }

    fn validator(pubkey: [u8; 48], effective_balance: u64, activation_epoch: u64) -> Validator {
        Validator {
            pubkey: PublicKeyBytes(pubkey),
            withdrawal_credentials: H256::repeat_byte(1),
            effective_balance,
            activation_epoch,
            ..Validator::default()
        }
    }

    #[test]
    fn a_single_active_validator_fills_the_whole_committee() {
        let validators = [validator(
            hex!("b4702b219bcf6691b580aa96814b170713451bcfd75d2f6ebd241df7e4f6b6e30f0ec16c9098242c11c95acade4120ec"),
            32_000_000_000,
            0,
        )];

        let committee = get_genesis_sync_committee(&specs(u64::MAX), &validators, RANDAO_MIX)
            .expect("committee is selectable");

        assert_eq!(committee.pubkeys.len(), 32);
        assert_eq!(committee.pubkeys[0], validators[0].pubkey);
        assert_eq!(
            committee.aggregate_pubkey,
            PublicKeyBytes(hex!(
                "967143d1b28b44b3ff75cba085213bc579dbbe04e35b8d7395f6f4e059f8e44c8af9f12b6174aae223e9c28171eae287"
            )),
        );
    }

    #[test]
    fn selection_weighs_balances_and_skips_inactive_validators() {
        let validators = [
            validator(
                hex!("b4702b219bcf6691b580aa96814b170713451bcfd75d2f6ebd241df7e4f6b6e30f0ec16c9098242c11c95acade4120ec"),
                32_000_000_000,
                0,
            ),
            validator(
                hex!("90588ecdaff043834c21035154c5820d02df74d06535bee41c330871a070a66920c22631574d46bb7e9ce5f890449d7d"),
                32_000_000_000,
                0,
            ),
            validator(
                hex!("a6c0b935ecd925451824d563fa5d5e2dd5c8fe2ae26fed844ee369876896f5f8e764a2cfddc2c86b6e2354249849a829"),
                16_000_000_000,
                0,
            ),
            validator(
                hex!("80804dcea8e0a7925083250ee74ec20e1353a9c4d564e98a5cdd9ffee3a3319100cf89b2eb3458718d2baeb6413251f5"),
                32_000_000_000,
                1,
            ),
        ];

        let committee = get_genesis_sync_committee(&specs(u64::MAX), &validators, RANDAO_MIX)
            .expect("committee is selectable");

        assert_eq!(committee.pubkeys[0], validators[2].pubkey);
        assert_eq!(
            committee.aggregate_pubkey,
            PublicKeyBytes(hex!(
                "811a1cc964bcd4314fe43d78791f00f0b57171bf1ca6330b8de4032bb8001b7b5503a92b63728bb8d373867e6dd810d6"
            )),
        );
    }

    #[test]
    fn electra_samples_sixteen_bit_values() {
        let validators = [
            validator(
                hex!("82cbb3de078c3d305a95b622bc34d1838ba4ba6f95a4e538f11e02b1df4595374fe2069eb1d9ac6c95e83ba1f0dfbe88"),
                32_000_000_000,
                0,
            ),
            validator(
                hex!("90588ecdaff043834c21035154c5820d02df74d06535bee41c330871a070a66920c22631574d46bb7e9ce5f890449d7d"),
                32_000_000_000,
                0,
            ),
        ];

        let committee = get_genesis_sync_committee(&specs(0), &validators, RANDAO_MIX)
            .expect("committee is selectable");

        assert_eq!(committee.pubkeys[0], validators[1].pubkey);
        assert_eq!(
            committee.aggregate_pubkey,
            PublicKeyBytes(hex!(
                "83ac2d259c286e5e3b5150fbf876d221f436c8c2e39aaf016290b7498243e2466bd830346cd13e891bad3a84a21ffb46"
            )),
        );
    }

    #[test]
    fn invalid_public_keys_are_rejected() {
        let validators = [validator([0; 48], 32_000_000_000, 0)];

        get_genesis_sync_committee(&specs(0), &validators, RANDAO_MIX)
            .expect_err("the zero pubkey is not a valid point");
    }

    #[test]
    fn an_empty_active_set_is_an_error() {
        for electra_fork_epoch in [u64::MAX, 0] {
            get_genesis_sync_committee(&specs(electra_fork_epoch), &[], RANDAO_MIX)
                .expect_err("no validators to select from");

            let inactive = [validator(
                hex!("b4702b219bcf6691b580aa96814b170713451bcfd75d2f6ebd241df7e4f6b6e30f0ec16c9098242c11c95acade4120ec"),
                32_000_000_000,
                1,
            )];

            get_genesis_sync_committee(&specs(electra_fork_epoch), &inactive, RANDAO_MIX)
                .expect_err("no active validators to select from");
        }
    }
}
