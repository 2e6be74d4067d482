use std::sync::Mutex;

use anyhow::Result;
use ethereum_types::H256;

use crate::{
    error::Error,
    merkle::{merkleize_chunks, mix_in_length, BYTES_PER_CHUNK},
};

/// A chunk accumulator for hash-tree-root computations.
///
/// Values are appended as 32 byte chunks in field declaration order and then
/// collapsed into subtree roots with [`Hasher::merkleize`] or
/// [`Hasher::merkleize_with_mixin`], whose capacities are runtime values.
/// A finished computation leaves exactly one chunk, returned by
/// [`Hasher::hash_root`].
#[derive(Default)]
pub struct Hasher {
    chunks: Vec<H256>,
}

impl Hasher {
    /// Current chunk position, to be passed back into a `merkleize_*` call
    /// as the start of a subtree.
    #[must_use]
    pub fn index(&self) -> usize {
        self.chunks.len()
    }

    /// Appends raw bytes split into 32 byte chunks, zero-padding the last.
    pub fn append_bytes32(&mut self, bytes: &[u8]) {
        for piece in bytes.chunks(BYTES_PER_CHUNK) {
            let mut chunk = H256::zero();
            chunk.as_bytes_mut()[..piece.len()].copy_from_slice(piece);
            self.chunks.push(chunk);
        }
    }

    /// Appends a fixed-size byte vector field. Values longer than one chunk
    /// are collapsed into their subtree root immediately.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        if bytes.len() <= BYTES_PER_CHUNK {
            self.append_bytes32(bytes);
            return;
        }

        let start = self.index();
        self.append_bytes32(bytes);

        self.merkleize(start)
            .expect("chunk count of a fixed-size field is a valid capacity");
    }

    pub fn put_u64(&mut self, value: u64) {
        let mut chunk = H256::zero();
        chunk.as_bytes_mut()[..8].copy_from_slice(&value.to_le_bytes());
        self.chunks.push(chunk);
    }

    pub fn put_u8(&mut self, value: u8) {
        let mut chunk = H256::zero();
        chunk.as_bytes_mut()[0] = value;
        self.chunks.push(chunk);
    }

    pub fn put_root(&mut self, root: H256) {
        self.chunks.push(root);
    }

    /// Collapses the chunks appended since `start` into a container or
    /// fixed-vector root, padding to the next power of two.
    pub fn merkleize(&mut self, start: usize) -> Result<(), Error> {
        let count = self.chunks.len() - start;
        let capacity = count.max(1).next_power_of_two() as u64;
        let root = merkleize_chunks(&self.chunks[start..], capacity)?;
        self.collapse(start, root);
        Ok(())
    }

    /// Collapses the chunks appended since `start` into a list root of the
    /// given chunk capacity and mixes in the true `length`.
    pub fn merkleize_with_mixin(
        &mut self,
        start: usize,
        length: u64,
        capacity: u64,
    ) -> Result<(), Error> {
        let root = merkleize_chunks(&self.chunks[start..], capacity)?;
        self.collapse(start, mix_in_length(root, length));
        Ok(())
    }

    /// Returns the root of a fully collapsed computation.
    pub fn hash_root(&mut self) -> Result<H256, Error> {
        match *self.chunks.as_slice() {
            [root] => Ok(root),
            _ => Err(Error::UnbalancedHasher {
                chunks: self.chunks.len(),
            }),
        }
    }

    fn collapse(&mut self, start: usize, root: H256) {
        self.chunks.truncate(start);
        self.chunks.push(root);
    }

    fn reset(&mut self) {
        self.chunks.clear();
    }
}

// Hashers are recycled to avoid reallocating chunk buffers for every root.
// The pool is purely an optimization; a poisoned lock falls back to fresh
// hashers.
static POOL: Mutex<Vec<Hasher>> = Mutex::new(Vec::new());

/// Runs `build` with a pooled [`Hasher`] and returns the resulting root.
pub fn hash_with(build: impl FnOnce(&mut Hasher) -> Result<()>) -> Result<H256> {
    let mut hasher = POOL
        .lock()
        .ok()
        .and_then(|mut pool| pool.pop())
        .unwrap_or_default();

    let root = build(&mut hasher).and_then(|()| hasher.hash_root().map_err(Into::into));

    hasher.reset();

    if let Ok(mut pool) = POOL.lock() {
        pool.push(hasher);
    }

    root
}
