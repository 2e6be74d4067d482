//! SSZ Merkleization with runtime-configurable capacities.
//!
//! List and vector capacities in this project come from the consensus
//! configuration rather than from the type system, so Merkleization is
//! exposed as functions of `(chunks, capacity)` and a chunk-accumulating
//! [`Hasher`] instead of being derived from container types.

pub use crate::{
    error::Error,
    hasher::{hash_with, Hasher},
    merkle::{
        chunks_for_byte_limit, depth_for_capacity, merkleize_chunks, mix_in_length, BYTES_PER_CHUNK,
    },
};

mod error;
mod hasher;
mod merkle;
