use serde::Serialize;

use crate::{
    altair, bellatrix, capella, deneb, electra,
    nonstandard::Phase,
    phase0::{self, primitives::{UnixSeconds, H256}},
};

/// The versioned beacon state: one variant per supported fork.
///
/// Serializing as JSON yields the bare state object of the active variant,
/// which is the canonical textual form.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(untagged)]
pub enum BeaconState {
    Phase0(phase0::beacon_state::BeaconState),
    Altair(altair::beacon_state::BeaconState),
    Bellatrix(bellatrix::beacon_state::BeaconState),
    Capella(capella::beacon_state::BeaconState),
    Deneb(deneb::beacon_state::BeaconState),
    Electra(electra::beacon_state::BeaconState),
}

impl BeaconState {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Phase0(_) => Phase::Phase0,
            Self::Altair(_) => Phase::Altair,
            Self::Bellatrix(_) => Phase::Bellatrix,
            Self::Capella(_) => Phase::Capella,
            Self::Deneb(_) => Phase::Deneb,
            Self::Electra(_) => Phase::Electra,
        }
    }

    #[must_use]
    pub const fn genesis_time(&self) -> UnixSeconds {
        match self {
            Self::Phase0(state) => state.genesis_time,
            Self::Altair(state) => state.genesis_time,
            Self::Bellatrix(state) => state.genesis_time,
            Self::Capella(state) => state.genesis_time,
            Self::Deneb(state) => state.genesis_time,
            Self::Electra(state) => state.genesis_time,
        }
    }

    #[must_use]
    pub const fn genesis_validators_root(&self) -> H256 {
        match self {
            Self::Phase0(state) => state.genesis_validators_root,
            Self::Altair(state) => state.genesis_validators_root,
            Self::Bellatrix(state) => state.genesis_validators_root,
            Self::Capella(state) => state.genesis_validators_root,
            Self::Deneb(state) => state.genesis_validators_root,
            Self::Electra(state) => state.genesis_validators_root,
        }
    }

    #[must_use]
    pub fn validator_count(&self) -> usize {
        match self {
            Self::Phase0(state) => state.validators.len(),
            Self::Altair(state) => state.validators.len(),
            Self::Bellatrix(state) => state.validators.len(),
            Self::Capella(state) => state.validators.len(),
            Self::Deneb(state) => state.validators.len(),
            Self::Electra(state) => state.validators.len(),
        }
    }

    /// SSZ encoding of the active variant.
    #[must_use]
    pub fn to_ssz(&self) -> Vec<u8> {
        match self {
            Self::Phase0(state) => state.to_ssz(),
            Self::Altair(state) => state.to_ssz(),
            Self::Bellatrix(state) => state.to_ssz(),
            Self::Capella(state) => state.to_ssz(),
            Self::Deneb(state) => state.to_ssz(),
            Self::Electra(state) => state.to_ssz(),
        }
    }
}

impl From<phase0::beacon_state::BeaconState> for BeaconState {
    fn from(state: phase0::beacon_state::BeaconState) -> Self {
        Self::Phase0(state)
    }
}

impl From<altair::beacon_state::BeaconState> for BeaconState {
    fn from(state: altair::beacon_state::BeaconState) -> Self {
        Self::Altair(state)
    }
}

impl From<bellatrix::beacon_state::BeaconState> for BeaconState {
    fn from(state: bellatrix::beacon_state::BeaconState) -> Self {
        Self::Bellatrix(state)
    }
}

impl From<capella::beacon_state::BeaconState> for BeaconState {
    fn from(state: capella::beacon_state::BeaconState) -> Self {
        Self::Capella(state)
    }
}

impl From<deneb::beacon_state::BeaconState> for BeaconState {
    fn from(state: deneb::beacon_state::BeaconState) -> Self {
        Self::Deneb(state)
    }
}

impl From<electra::beacon_state::BeaconState> for BeaconState {
    fn from(state: electra::beacon_state::BeaconState) -> Self {
        Self::Electra(state)
    }
}
