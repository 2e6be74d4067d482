use core::num::NonZeroU64;

use ethereum_types::H256;

// Single-index swap-or-not shuffling, originally based on:
// <https://github.com/protolambda/eth2-shuffle/tree/fd840f1036c1f8f6d7625ffe6ff4d9c60f942876>
//
// The round count is a runtime parameter because it comes from the consensus
// configuration (`SHUFFLE_ROUND_COUNT`). Running the rounds in reverse order
// un-swaps every pair, which makes the permutation invertible without
// materializing the shuffled list.

/// Returns the position `index` would occupy in the shuffled list.
#[must_use]
pub fn permute_index(rounds: u8, index: u64, list_size: NonZeroU64, seed: H256) -> u64 {
    shuffle_index(rounds, index, list_size, seed, true)
}

/// Inverse of [`permute_index`]: returns the original position of the element
/// found at `index` after shuffling.
#[must_use]
pub fn unpermute_index(rounds: u8, index: u64, list_size: NonZeroU64, seed: H256) -> u64 {
    shuffle_index(rounds, index, list_size, seed, false)
}

fn shuffle_index(rounds: u8, mut index: u64, list_size: NonZeroU64, seed: H256, forward: bool) -> u64 {
    assert!(index < list_size.get());

    for step in 0..rounds {
        let round = if forward { step } else { rounds - 1 - step };

        let pivot = compute_pivot(seed, round, list_size);
        let flip = (pivot + (list_size.get() - index)) % list_size;
        // Consider every pair only once by always sourcing randomness from
        // the higher position of the two.
        let position = index.max(flip);

        // Truncating the window matches `compute_shuffled_index` in
        // `consensus-specs`.
        #[allow(clippy::cast_possible_truncation)]
        let source = compute_source(seed, round, (position >> 8) as u32);

        let byte = source.as_bytes()[((position & 0xff) >> 3) as usize];
        let bit = (byte >> (position & 0x07)) & 1;

        if bit == 1 {
            index = flip;
        }
    }

    index
}

fn compute_pivot(seed: H256, round: u8, index_count: NonZeroU64) -> u64 {
    let digest = hashing::hash_256_8(seed, round);
    let pivot = u64::from_le_bytes(
        digest.as_bytes()[..8]
            .try_into()
            .expect("slice has the same size as u64"),
    );
    pivot % index_count
}

fn compute_source(seed: H256, round: u8, position_window: u32) -> H256 {
    hashing::hash_256_8_32(seed, round, position_window)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use nonzero_ext::nonzero;

    use super::*;

    const SEED: H256 = H256(hex!(
        "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
    ));

    #[test]
    fn zero_rounds_leave_the_index_unchanged() {
        assert_eq!(permute_index(0, 31, nonzero!(64_u64), SEED), 31);
        assert_eq!(unpermute_index(0, 31, nonzero!(64_u64), SEED), 31);
    }

    #[test]
    fn one_round_with_a_fixed_seed() {
        let seed = H256(hex!(
            "4ff6f743a43f3b4f95350831aeaf0a122a1a392922c45d804280284a69eb850b"
        ));

        assert_eq!(permute_index(1, 0, nonzero!(32_u64), seed), 0);
    }

    #[test]
    fn ten_rounds_with_a_fixed_seed() {
        assert_eq!(permute_index(10, 5, nonzero!(64_u64), SEED), 27);
        assert_eq!(unpermute_index(10, 31, nonzero!(64_u64), SEED), 47);
    }

    #[test]
    fn unpermute_inverts_permute_for_every_index() {
        for rounds in [1, 10, 90] {
            for list_size in [1, 2, 33, 64] {
                let list_size = NonZeroU64::new(list_size).unwrap();

                for index in 0..list_size.get() {
                    let shuffled = permute_index(rounds, index, list_size, SEED);

                    assert!(shuffled < list_size.get());
                    assert_eq!(unpermute_index(rounds, shuffled, list_size, SEED), index);
                }
            }
        }
    }
}
