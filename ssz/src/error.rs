use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{chunks} chunks exceed Merkleization capacity of {capacity}")]
    CapacityExceeded { chunks: usize, capacity: u64 },
    #[error("Merkleization depth {depth} exceeds precomputed zero hashes")]
    DepthTooLarge { depth: usize },
    #[error("hasher finished with {chunks} chunks instead of a single root")]
    UnbalancedHasher { chunks: usize },
}
