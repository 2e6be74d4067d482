use fixed_hash::construct_fixed_hash;
use impl_serde::impl_fixed_hash_serde;

use crate::SIGNATURE_SIZE;

construct_fixed_hash! {
    /// A compressed BLS signature. This project never verifies signatures;
    /// the type only exists so containers carrying them can serialize.
    pub struct SignatureBytes(SIGNATURE_SIZE);
}

impl_fixed_hash_serde!(SignatureBytes, SIGNATURE_SIZE);
