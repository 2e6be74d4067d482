use crate::phase0::primitives::{Epoch, Slot};

pub const FAR_FUTURE_EPOCH: Epoch = Epoch::MAX;
pub const GENESIS_EPOCH: Epoch = 0;
pub const GENESIS_SLOT: Slot = 0;

/// SSZ size of a serialized [`Validator`](crate::phase0::containers::Validator).
pub const VALIDATOR_SIZE: usize = 121;

/// Justification bits form a bit vector of this many bits.
pub const JUSTIFICATION_BITS_LENGTH: usize = 4;
