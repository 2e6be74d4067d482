use fixed_hash::construct_fixed_hash;
use impl_serde::impl_fixed_hash_serde;

use crate::COMPRESSED_SIZE;

construct_fixed_hash! {
    /// A compressed BLS public key as found in input files and containers.
    /// Not necessarily a valid curve point; see [`crate::PublicKey`].
    pub struct PublicKeyBytes(COMPRESSED_SIZE);
}

impl_fixed_hash_serde!(PublicKeyBytes, COMPRESSED_SIZE);

impl AsRef<[u8; COMPRESSED_SIZE]> for PublicKeyBytes {
    #[inline]
    fn as_ref(&self) -> &[u8; COMPRESSED_SIZE] {
        &self.0
    }
}
