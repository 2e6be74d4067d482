use std::{fs, path::Path};

use alloy_consensus::{
    constants::{EMPTY_OMMER_ROOT_HASH, EMPTY_ROOT_HASH},
    Header,
};
use alloy_eips::eip7685::EMPTY_REQUESTS_HASH;
use alloy_genesis::{ChainConfig, Genesis};
use alloy_primitives::{Bloom, B256, B64, U256};
use anyhow::{Context as _, Result};

use crate::{block::ExecutionBlock, state_root::genesis_state_root};

/// Gas limit applied when the genesis description leaves it at zero.
const GENESIS_GAS_LIMIT: u64 = 4_712_388;

/// Base fee applied at a London-active genesis that does not set one.
const INITIAL_BASE_FEE: u64 = 1_000_000_000;

pub fn load_genesis_file(path: impl AsRef<Path>) -> Result<Genesis> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read eth1 config file {}", path.display()))?;

    serde_json::from_str(&json).context("failed to decode eth1 config file")
}

/// Derives the canonical genesis block from an EL genesis description:
/// the state root over the allocation, then the header with the fork-
/// dependent fields a London/Shanghai/Cancun/Prague-active chain carries
/// from its first block.
#[must_use]
pub fn genesis_to_block(genesis: &Genesis) -> ExecutionBlock {
    let timestamp = genesis.timestamp;
    let config = &genesis.config;

    let gas_limit = if genesis.gas_limit == 0 {
        GENESIS_GAS_LIMIT
    } else {
        genesis.gas_limit
    };

    let base_fee_per_gas = london_active_at_genesis(config).then(|| {
        genesis
            .base_fee_per_gas
            .map_or(U256::from(INITIAL_BASE_FEE), U256::from)
    });

    let shanghai = active_at(config.shanghai_time, timestamp);
    let cancun = active_at(config.cancun_time, timestamp);
    let prague = active_at(config.prague_time, timestamp);

    let blob_gas_used = cancun.then(|| genesis.blob_gas_used.unwrap_or_default());
    let excess_blob_gas = cancun.then(|| genesis.excess_blob_gas.unwrap_or_default());

    let state_root = genesis_state_root(&genesis.alloc);

    let header = Header {
        parent_hash: B256::ZERO,
        ommers_hash: EMPTY_OMMER_ROOT_HASH,
        beneficiary: genesis.coinbase,
        state_root,
        transactions_root: EMPTY_ROOT_HASH,
        receipts_root: EMPTY_ROOT_HASH,
        logs_bloom: Bloom::ZERO,
        difficulty: genesis.difficulty,
        number: genesis.number.unwrap_or_default(),
        gas_limit,
        gas_used: 0,
        timestamp,
        extra_data: genesis.extra_data.clone(),
        mix_hash: genesis.mix_hash,
        nonce: B64::new(genesis.nonce.to_be_bytes()),
        base_fee_per_gas: base_fee_per_gas.map(|fee| fee.saturating_to()),
        withdrawals_root: shanghai.then_some(EMPTY_ROOT_HASH),
        blob_gas_used,
        excess_blob_gas,
        parent_beacon_block_root: cancun.then_some(B256::ZERO),
        requests_hash: prague.then_some(EMPTY_REQUESTS_HASH),
    };

    ExecutionBlock {
        hash: header.hash_slow(),
        parent_hash: header.parent_hash,
        state_root,
        receipts_root: header.receipts_root,
        logs_bloom: header.logs_bloom,
        coinbase: header.beneficiary,
        number: header.number,
        gas_limit: header.gas_limit,
        gas_used: header.gas_used,
        timestamp,
        extra_data: header.extra_data.clone(),
        base_fee_per_gas,
        blob_gas_used,
        excess_blob_gas,
        transactions: vec![],
        withdrawals: shanghai.then_some(vec![]),
    }
}

fn london_active_at_genesis(config: &ChainConfig) -> bool {
    config.london_block == Some(0)
}

fn active_at(fork_time: Option<u64>, timestamp: u64) -> bool {
    fork_time.is_some_and(|time| time <= timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devnet_genesis() -> Genesis {
        serde_json::from_str(
            r#"{
                "config": {
                    "chainId": 1337,
                    "homesteadBlock": 0,
                    "berlinBlock": 0,
                    "londonBlock": 0,
                    "shanghaiTime": 0,
                    "cancunTime": 0,
                    "terminalTotalDifficulty": 0
                },
                "nonce": "0x1234",
                "timestamp": "0x6490fdd2",
                "extraData": "0x",
                "gasLimit": "0x1c9c380",
                "difficulty": "0x0",
                "mixHash": "0x0000000000000000000000000000000000000000000000000000000000000000",
                "coinbase": "0x0000000000000000000000000000000000000000",
                "alloc": {
                    "0x0000000000000000000000000000000000000001": {
                        "balance": "0x10000000000"
                    }
                },
                "baseFeePerGas": "0x3b9aca00"
            }"#,
        )
        .expect("genesis document is valid")
    }

    #[test]
    fn fork_dependent_fields_follow_the_chain_config() {
        let block = genesis_to_block(&devnet_genesis());

        assert_eq!(block.number, 0);
        assert_eq!(block.gas_limit, 0x1c9_c380);
        assert_eq!(block.base_fee_per_gas, Some(U256::from(1_000_000_000_u64)));
        assert_eq!(block.blob_gas_used, Some(0));
        assert_eq!(block.excess_blob_gas, Some(0));
        assert_eq!(block.withdrawals, Some(vec![]));
        assert_ne!(block.hash, B256::ZERO);
        assert_ne!(block.state_root, EMPTY_ROOT_HASH);
    }

    #[test]
    fn pre_merge_genesis_omits_post_merge_fields() {
        let mut genesis = devnet_genesis();
        genesis.config.london_block = None;
        genesis.config.shanghai_time = None;
        genesis.config.cancun_time = None;
        genesis.base_fee_per_gas = None;

        let block = genesis_to_block(&genesis);

        assert_eq!(block.base_fee_per_gas, None);
        assert_eq!(block.blob_gas_used, None);
        assert_eq!(block.excess_blob_gas, None);
        assert_eq!(block.withdrawals, None);
    }

    #[test]
    fn the_block_hash_is_stable_for_identical_input() {
        assert_eq!(
            genesis_to_block(&devnet_genesis()).hash,
            genesis_to_block(&devnet_genesis()).hash,
        );
    }
}
