use anyhow::{Context as _, Result};
use types::{combined::BeaconState, specs::Specs};

use crate::Error;

/// Output encodings of the versioned beacon state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContentType {
    /// Binary SSZ, bit-identical to reference implementations.
    Ssz,
    /// Canonical JSON with decimal-string integers and hex byte strings.
    Json,
}

/// Encodes a state, rejecting registries that exceed the configured SSZ
/// capacity before any bytes are produced.
pub fn serialize_state(
    state: &BeaconState,
    content_type: ContentType,
    specs: &Specs,
) -> Result<Vec<u8>> {
    let limit = specs.get_uint_default("VALIDATOR_REGISTRY_LIMIT", 1_099_511_627_776);
    let count = state.validator_count();

    if count as u64 > limit {
        return Err(Error::RegistryLimitExceeded { count, limit }.into());
    }

    match content_type {
        ContentType::Ssz => Ok(state.to_ssz()),
        ContentType::Json => {
            serde_json::to_vec(state).context("failed to encode beacon state as JSON")
        }
    }
}
