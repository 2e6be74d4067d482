use ethereum_types::H256;
use hashing::ZERO_HASHES;

use crate::error::Error;

pub const BYTES_PER_CHUNK: usize = 32;

/// Chunk capacity of a byte list with the given byte limit.
#[must_use]
pub const fn chunks_for_byte_limit(byte_limit: u64) -> u64 {
    byte_limit.div_ceil(BYTES_PER_CHUNK as u64)
}

/// Height of the Merkle tree that holds `capacity` chunks,
/// i.e. `ceil(log₂(capacity))`.
#[must_use]
pub const fn depth_for_capacity(capacity: u64) -> usize {
    if capacity <= 1 {
        0
    } else {
        (u64::BITS - (capacity - 1).leading_zeros()) as usize
    }
}

/// Merkleizes `chunks` into the root of a tree sized for `capacity` chunks.
///
/// Missing leaves and subtrees are padded with entries of
/// [`hashing::ZERO_HASHES`]. The length of a list is *not* mixed in here;
/// see [`mix_in_length`].
pub fn merkleize_chunks(chunks: &[H256], capacity: u64) -> Result<H256, Error> {
    if chunks.len() as u64 > capacity {
        return Err(Error::CapacityExceeded {
            chunks: chunks.len(),
            capacity,
        });
    }

    let depth = depth_for_capacity(capacity);

    if depth >= ZERO_HASHES.len() {
        return Err(Error::DepthTooLarge { depth });
    }

    if chunks.is_empty() {
        return Ok(ZERO_HASHES[depth]);
    }

    let mut level = chunks.to_vec();

    for height in 0..depth {
        if level.len() % 2 == 1 {
            level.push(ZERO_HASHES[height]);
        }

        level = level
            .chunks_exact(2)
            .map(|pair| hashing::hash_256_256(pair[0], pair[1]))
            .collect();
    }

    Ok(level[0])
}

/// Mixes the true length of a list into its Merkle root.
#[must_use]
pub fn mix_in_length(root: H256, length: u64) -> H256 {
    let mut chunk = H256::zero();
    chunk.as_bytes_mut()[..8].copy_from_slice(&length.to_le_bytes());
    hashing::hash_256_256(root, chunk)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn depths_round_up_to_the_next_power_of_two() {
        assert_eq!(depth_for_capacity(0), 0);
        assert_eq!(depth_for_capacity(1), 0);
        assert_eq!(depth_for_capacity(2), 1);
        assert_eq!(depth_for_capacity(3), 2);
        assert_eq!(depth_for_capacity(16), 4);
        assert_eq!(depth_for_capacity(17), 5);
        assert_eq!(depth_for_capacity(1 << 40), 40);
    }

    #[test]
    fn empty_tree_root_is_the_zero_subtree_of_matching_depth() {
        assert_eq!(merkleize_chunks(&[], 16), Ok(ZERO_HASHES[4]));
        assert_eq!(merkleize_chunks(&[], 1 << 32), Ok(ZERO_HASHES[32]));
    }

    #[test]
    fn single_chunk_at_capacity_one_is_its_own_root() {
        let chunk = H256::repeat_byte(0x11);
        assert_eq!(merkleize_chunks(&[chunk], 1), Ok(chunk));
    }

    #[test]
    fn overfull_trees_are_rejected() {
        let chunks = [H256::zero(), H256::zero(), H256::zero()];

        assert_eq!(
            merkleize_chunks(&chunks, 2),
            Err(Error::CapacityExceeded {
                chunks: 3,
                capacity: 2,
            }),
        );
    }

    #[test]
    fn empty_list_mixin_matches_known_deposit_root() {
        // The root the deposit contract reports before any deposits are made.
        let root = mix_in_length(merkleize_chunks(&[], 1 << 32).unwrap(), 0);

        assert_eq!(
            root,
            H256(hex!(
                "d70a234731285c6804c2a4f56711ddb8c82c99740f207854891028af34e27e5e"
            )),
        );
    }
}
