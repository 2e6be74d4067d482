use alloy_genesis::Genesis;
use anyhow::Result;
use eth1::ExecutionBlock;
use types::{combined::BeaconState, config::Config, nonstandard::Phase, specs::Specs};
use validators::Validator as InputValidator;

use crate::{
    common::{assemble_common, CommonFields},
    serialize::{serialize_state, ContentType},
    Error,
};

pub(crate) use self::{
    altair::AltairBuilder, bellatrix::BellatrixBuilder, capella::CapellaBuilder,
    deneb::DenebBuilder, electra::ElectraBuilder, phase0::Phase0Builder,
};

mod altair;
mod bellatrix;
mod capella;
mod deneb;
mod electra;
mod phase0;

/// The state every fork-specific builder shares: the inputs it was created
/// from, the flattened specification captured from them, plus the optional
/// shadow-fork override and accumulated validators.
pub(crate) struct BuilderParts {
    el_genesis: Genesis,
    config: Config,
    specs: Specs,
    shadow_fork_block: Option<ExecutionBlock>,
    validators: Vec<InputValidator>,
}

impl BuilderParts {
    pub fn new(el_genesis: Genesis, config: Config) -> Self {
        let specs = Specs::from_config(&config);

        Self {
            el_genesis,
            config,
            specs,
            shadow_fork_block: None,
            validators: vec![],
        }
    }

    pub fn specs(&self) -> &Specs {
        &self.specs
    }

    pub fn set_shadow_fork_block(&mut self, block: ExecutionBlock) {
        self.shadow_fork_block = Some(block);
    }

    pub fn add_validators(&mut self, mut validators: Vec<InputValidator>) {
        self.validators.append(&mut validators);
    }

    pub fn common(&self, phase: Phase) -> Result<CommonFields> {
        assemble_common(
            &self.config,
            &self.specs,
            &self.el_genesis,
            self.shadow_fork_block.as_ref(),
            &self.validators,
            phase,
        )
    }

    pub fn serialize_checked(
        &self,
        state: &BeaconState,
        expected: Phase,
        content_type: ContentType,
    ) -> Result<Vec<u8>> {
        if state.phase() != expected {
            return Err(Error::UnsupportedStateVariant {
                built: state.phase(),
                expected,
            }
            .into());
        }

        serialize_state(state, content_type, &self.specs)
    }
}

#[cfg(test)]
mod tests {
    use bls::PublicKeyBytes;
    use hex_literal::hex;
    use types::phase0::{
        self,
        primitives::{H256, H32},
    };

    use crate::new_genesis_builder;

    use super::*;

    const EL_GENESIS: &str = r#"{
        "config": {
            "chainId": 1337,
            "homesteadBlock": 0,
            "berlinBlock": 0,
            "londonBlock": 0,
            "shanghaiTime": 0,
            "cancunTime": 0,
            "terminalTotalDifficulty": 0
        },
        "nonce": "0x0",
        "timestamp": "0x6490fdd2",
        "extraData": "0x",
        "gasLimit": "0x1c9c380",
        "difficulty": "0x0",
        "mixHash": "0x0000000000000000000000000000000000000000000000000000000000000000",
        "coinbase": "0x0000000000000000000000000000000000000000",
        "alloc": {},
        "baseFeePerGas": "0x3b9aca00"
    }"#;

    fn deneb_config() -> Config {
        Config::from_yaml_str(
            "PRESET_BASE: \"minimal\"\n\
             GENESIS_DELAY: 12\n\
             GENESIS_FORK_VERSION: \"0x10000000\"\n\
             ALTAIR_FORK_EPOCH: 0\n\
             ALTAIR_FORK_VERSION: \"0x20000000\"\n\
             BELLATRIX_FORK_EPOCH: 0\n\
             BELLATRIX_FORK_VERSION: \"0x30000000\"\n\
             CAPELLA_FORK_EPOCH: 0\n\
             CAPELLA_FORK_VERSION: \"0x40000000\"\n\
             DENEB_FORK_EPOCH: 0\n\
             DENEB_FORK_VERSION: \"0x50000000\"\n",
        )
        .expect("config is valid")
    }

    fn input_validators() -> Vec<InputValidator> {
        [
            hex!("b4702b219bcf6691b580aa96814b170713451bcfd75d2f6ebd241df7e4f6b6e30f0ec16c9098242c11c95acade4120ec"),
            hex!("90588ecdaff043834c21035154c5820d02df74d06535bee41c330871a070a66920c22631574d46bb7e9ce5f890449d7d"),
        ]
        .into_iter()
        .map(|pubkey| {
            let mut withdrawal_credentials = H256::zero();
            withdrawal_credentials.as_bytes_mut()[0] = 0x01;

            InputValidator {
                public_key: PublicKeyBytes(pubkey),
                withdrawal_credentials,
                balance: None,
            }
        })
        .collect()
    }

    #[test]
    fn the_dispatcher_builds_the_configured_fork() {
        let el_genesis: Genesis = serde_json::from_str(EL_GENESIS).expect("genesis is valid");

        let mut builder = new_genesis_builder(el_genesis, deneb_config());
        builder.add_validators(input_validators());

        let state = builder.build_state().expect("state builds");

        assert_eq!(state.phase(), Phase::Deneb);
        // max(MIN_GENESIS_TIME, block time) + GENESIS_DELAY
        assert_eq!(state.genesis_time(), 0x6490_fdd2 + 12);
        assert_ne!(state.genesis_validators_root(), H256::zero());

        let BeaconState::Deneb(ref deneb_state) = state else {
            unreachable!("the phase was checked above");
        };

        assert_eq!(deneb_state.fork.current_version, H32([0x50, 0, 0, 0]));
        assert_eq!(deneb_state.fork.previous_version, H32([0x40, 0, 0, 0]));
        assert_eq!(deneb_state.block_roots.len(), 64);
        assert_eq!(deneb_state.slashings.len(), 64);
        assert_eq!(deneb_state.randao_mixes.len(), 64);
        assert!(deneb_state
            .randao_mixes
            .iter()
            .all(|mix| *mix == deneb_state.eth1_data.block_hash));
        assert_eq!(deneb_state.validators.len(), 2);
        assert_eq!(deneb_state.balances, vec![32_000_000_000; 2]);
        assert_eq!(deneb_state.previous_epoch_participation, vec![0; 2]);
        assert_eq!(deneb_state.inactivity_scores, vec![0; 2]);
        assert_eq!(
            deneb_state.current_sync_committee,
            deneb_state.next_sync_committee,
        );
        assert_eq!(deneb_state.justification_bits, vec![0]);

        let json = builder
            .serialize(&state, ContentType::Json)
            .expect("state serializes to JSON");
        let json: serde_json::Value =
            serde_json::from_slice(&json).expect("output is valid JSON");

        assert_eq!(json["genesis_time"], (0x6490_fdd2 + 12_u64).to_string());
        assert_eq!(json["eth1_deposit_index"], "0");
        assert!(json["latest_execution_payload_header"]["base_fee_per_gas"].is_string());

        let ssz = builder
            .serialize(&state, ContentType::Ssz)
            .expect("state serializes to SSZ");

        // The fixed part starts with the genesis time.
        assert_eq!(ssz[..8], (0x6490_fdd2 + 12_u64).to_le_bytes());
    }

    #[test]
    fn serializing_a_foreign_variant_is_rejected() {
        let el_genesis: Genesis = serde_json::from_str(EL_GENESIS).expect("genesis is valid");

        let builder = new_genesis_builder(el_genesis, deneb_config());
        let foreign = BeaconState::Phase0(phase0::beacon_state::BeaconState::default());

        let error = builder
            .serialize(&foreign, ContentType::Ssz)
            .expect_err("the builder only serializes Deneb states");

        assert!(error.to_string().contains("phase0"));
    }
}
