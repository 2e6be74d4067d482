use alloy_primitives::{Address, B256, U256 as AlloyU256};
use anyhow::Result;
use eth1::ExecutionBlock;
use types::{
    bellatrix, capella, deneb,
    phase0::primitives::{H160, H256, U256},
    specs::Specs,
};

use crate::{roots, Error};

pub(crate) fn h256(value: B256) -> H256 {
    H256(value.0)
}

fn h160(value: Address) -> H160 {
    H160(value.0 .0)
}

/// Pre-Deneb headers store the base fee in SSZ byte order.
fn base_fee_bytes(value: Option<AlloyU256>) -> H256 {
    H256(value.unwrap_or_default().to_le_bytes::<32>())
}

fn base_fee_native(value: Option<AlloyU256>) -> U256 {
    U256::from_big_endian(&value.unwrap_or_default().to_be_bytes::<32>())
}

pub(crate) fn withdrawals_to_consensus(
    block: &ExecutionBlock,
) -> Option<Vec<capella::containers::Withdrawal>> {
    block.withdrawals.as_ref().map(|withdrawals| {
        withdrawals
            .iter()
            .map(|withdrawal| capella::containers::Withdrawal {
                index: withdrawal.index,
                validator_index: withdrawal.validator_index,
                address: H160(withdrawal.address.0 .0),
                amount: withdrawal.amount,
            })
            .collect()
    })
}

/// Withdrawals root for the payload header: the computed root when the
/// block carries a withdrawals list, all zeros otherwise.
fn withdrawals_root(block: &ExecutionBlock, specs: &Specs) -> Result<H256> {
    match withdrawals_to_consensus(block) {
        Some(withdrawals) => roots::compute_withdrawals_root(&withdrawals, specs),
        None => Ok(H256::zero()),
    }
}

pub(crate) fn bellatrix_header(
    block: &ExecutionBlock,
    specs: &Specs,
) -> Result<bellatrix::containers::ExecutionPayloadHeader> {
    let transactions_root = roots::compute_transactions_root(&block.transactions, specs)?;

    Ok(bellatrix::containers::ExecutionPayloadHeader {
        parent_hash: h256(block.parent_hash),
        fee_recipient: h160(block.coinbase),
        state_root: h256(block.state_root),
        receipts_root: h256(block.receipts_root),
        logs_bloom: block.logs_bloom.0 .0.to_vec(),
        prev_randao: H256::zero(),
        block_number: block.number,
        gas_limit: block.gas_limit,
        gas_used: block.gas_used,
        timestamp: block.timestamp,
        extra_data: block.extra_data.to_vec(),
        base_fee_per_gas: base_fee_bytes(block.base_fee_per_gas),
        block_hash: h256(block.hash),
        transactions_root,
    })
}

pub(crate) fn capella_header(
    block: &ExecutionBlock,
    specs: &Specs,
) -> Result<capella::containers::ExecutionPayloadHeader> {
    let transactions_root = roots::compute_transactions_root(&block.transactions, specs)?;
    let withdrawals_root = withdrawals_root(block, specs)?;

    Ok(capella::containers::ExecutionPayloadHeader {
        parent_hash: h256(block.parent_hash),
        fee_recipient: h160(block.coinbase),
        state_root: h256(block.state_root),
        receipts_root: h256(block.receipts_root),
        logs_bloom: block.logs_bloom.0 .0.to_vec(),
        prev_randao: H256::zero(),
        block_number: block.number,
        gas_limit: block.gas_limit,
        gas_used: block.gas_used,
        timestamp: block.timestamp,
        extra_data: block.extra_data.to_vec(),
        base_fee_per_gas: base_fee_bytes(block.base_fee_per_gas),
        block_hash: h256(block.hash),
        transactions_root,
        withdrawals_root,
    })
}

/// Deneb and Electra share this header shape. Both require the blob gas
/// accounting fields to be present on the execution block.
pub(crate) fn deneb_header(
    block: &ExecutionBlock,
    specs: &Specs,
) -> Result<deneb::containers::ExecutionPayloadHeader> {
    let blob_gas_used = block.blob_gas_used.ok_or(Error::MissingBlockField {
        field: "blob-gas-used",
    })?;
    let excess_blob_gas = block.excess_blob_gas.ok_or(Error::MissingBlockField {
        field: "excess-blob-gas",
    })?;

    let transactions_root = roots::compute_transactions_root(&block.transactions, specs)?;
    let withdrawals_root = withdrawals_root(block, specs)?;

    Ok(deneb::containers::ExecutionPayloadHeader {
        parent_hash: h256(block.parent_hash),
        fee_recipient: h160(block.coinbase),
        state_root: h256(block.state_root),
        receipts_root: h256(block.receipts_root),
        logs_bloom: block.logs_bloom.0 .0.to_vec(),
        prev_randao: H256::zero(),
        block_number: block.number,
        gas_limit: block.gas_limit,
        gas_used: block.gas_used,
        timestamp: block.timestamp,
        extra_data: block.extra_data.to_vec(),
        base_fee_per_gas: base_fee_native(block.base_fee_per_gas),
        block_hash: h256(block.hash),
        transactions_root,
        withdrawals_root,
        blob_gas_used,
        excess_blob_gas,
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bloom, Bytes};
    use types::config::Config;

    use super::*;

    fn specs() -> Specs {
        let config =
            Config::from_yaml_str("PRESET_BASE: \"mainnet\"\n").expect("config is valid");

        Specs::from_config(&config)
    }

    fn block() -> ExecutionBlock {
        ExecutionBlock {
            hash: B256::repeat_byte(0xaa),
            parent_hash: B256::repeat_byte(0xbb),
            state_root: B256::repeat_byte(0xcc),
            receipts_root: B256::repeat_byte(0xdd),
            logs_bloom: Bloom::ZERO,
            coinbase: Address::repeat_byte(0xee),
            number: 0,
            gas_limit: 30_000_000,
            gas_used: 0,
            timestamp: 1_700_000_000,
            extra_data: Bytes::from_static(b"devnet"),
            base_fee_per_gas: Some(AlloyU256::from(7_u64)),
            blob_gas_used: Some(0),
            excess_blob_gas: Some(0),
            transactions: vec![],
            withdrawals: Some(vec![]),
        }
    }

    #[test]
    fn the_base_fee_encoding_differs_between_capella_and_deneb() {
        let capella = capella_header(&block(), &specs()).expect("header folds");
        let deneb = deneb_header(&block(), &specs()).expect("header folds");

        // Capella stores the little-endian bytes; the value 7 lands in the
        // first byte. Deneb keeps the native integer.
        assert_eq!(capella.base_fee_per_gas[0], 7);
        assert_eq!(deneb.base_fee_per_gas, U256::from(7));

        assert_eq!(capella.transactions_root, deneb.transactions_root);
        assert_eq!(capella.withdrawals_root, deneb.withdrawals_root);
        assert_ne!(capella.withdrawals_root, H256::zero());
    }

    #[test]
    fn bellatrix_headers_have_no_withdrawals_root() {
        let mut block = block();
        block.withdrawals = None;

        let header = bellatrix_header(&block, &specs()).expect("header folds");

        assert_eq!(header.block_hash, H256::repeat_byte(0xaa));
        assert_eq!(header.prev_randao, H256::zero());
        assert_eq!(header.extra_data, b"devnet");

        // Without a withdrawals list the Capella shape stores all zeros.
        let header = capella_header(&block, &specs()).expect("header folds");
        assert_eq!(header.withdrawals_root, H256::zero());
    }

    #[test]
    fn deneb_requires_blob_gas_fields() {
        let mut incomplete = block();
        incomplete.blob_gas_used = None;

        let error = deneb_header(&incomplete, &specs()).expect_err("blob gas is missing");
        assert!(error.to_string().contains("blob-gas-used"));

        let mut incomplete = block();
        incomplete.excess_blob_gas = None;

        let error = deneb_header(&incomplete, &specs()).expect_err("excess blob gas is missing");
        assert!(error.to_string().contains("excess-blob-gas"));
    }

    #[test]
    fn capella_does_not_require_blob_gas_fields() {
        let mut block = block();
        block.blob_gas_used = None;
        block.excess_blob_gas = None;

        capella_header(&block, &specs()).expect("header folds without blob gas");
    }
}
