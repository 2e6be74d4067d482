use anyhow::{ensure, Result};
use ssz::Hasher;
use types::{capella::containers::Withdrawal, phase0::primitives::H256, specs::Specs};

use crate::Error;

/// Hash-tree-root of the empty deposit tree, used as
/// `eth1_data.deposit_root` in genesis states.
pub fn compute_deposit_root(specs: &Specs) -> Result<H256> {
    let tree_depth = specs.get_uint_default("DEPOSIT_CONTRACT_TREE_DEPTH", 32);
    ensure!(tree_depth < 64, "deposit tree depth {tree_depth} out of range");

    let max_deposits = specs.get_uint_default("MAX_DEPOSITS_PER_PAYLOAD", 1 << tree_depth);

    ssz::hash_with(|hasher| {
        hasher.merkleize_with_mixin(0, 0, max_deposits)?;
        Ok(())
    })
}

/// Hash-tree-root of the payload's transactions: each transaction in its
/// canonical EL binary encoding merkleized as a byte list, then the list of
/// per-transaction roots. Not to be confused with the legacy MPT root in
/// the EL block header.
pub fn compute_transactions_root(
    transactions: &[impl AsRef<[u8]>],
    specs: &Specs,
) -> Result<H256> {
    let count = transactions.len() as u64;
    let max_transactions = specs.get_uint_default("MAX_TRANSACTIONS_PER_PAYLOAD", 1_048_576);

    if count > max_transactions {
        return Err(Error::TooManyTransactions {
            count,
            maximum: max_transactions,
        }
        .into());
    }

    let max_bytes = specs.get_uint_default("MAX_BYTES_PER_TRANSACTION", 1_073_741_824);

    ssz::hash_with(|hasher| {
        for (index, transaction) in transactions.iter().enumerate() {
            let transaction = transaction.as_ref();
            let byte_length = transaction.len() as u64;

            if byte_length > max_bytes {
                return Err(Error::TransactionTooLong { index }.into());
            }

            let start = hasher.index();
            hasher.append_bytes32(transaction);
            hasher.merkleize_with_mixin(start, byte_length, ssz::chunks_for_byte_limit(max_bytes))?;
        }

        hasher.merkleize_with_mixin(0, count, max_transactions)?;
        Ok(())
    })
}

/// Hash-tree-root of the payload's withdrawals.
pub fn compute_withdrawals_root(withdrawals: &[Withdrawal], specs: &Specs) -> Result<H256> {
    let count = withdrawals.len() as u64;
    let maximum = specs.get_uint_default("MAX_WITHDRAWALS_PER_PAYLOAD", 16);

    if count > maximum {
        return Err(Error::TooManyWithdrawals { count, maximum }.into());
    }

    ssz::hash_with(|hasher| {
        for withdrawal in withdrawals {
            withdrawal.hash_to(hasher)?;
        }

        hasher.merkleize_with_mixin(0, count, maximum)?;
        Ok(())
    })
}

/// Every RANDAO mix of a genesis state is seeded with the genesis block
/// hash.
#[must_use]
pub fn seed_randao_mixes(genesis_block_hash: H256, specs: &Specs) -> Vec<H256> {
    let length = specs.get_uint_default("EPOCHS_PER_HISTORICAL_VECTOR", 65_536);
    vec![genesis_block_hash; length as usize]
}

/// Shared helper for zero-length lists: the subtree of the full capacity
/// with a zero length mixed in.
pub(crate) fn empty_list(hasher: &mut Hasher, capacity: u64) -> Result<(), ssz::Error> {
    let start = hasher.index();
    hasher.merkleize_with_mixin(start, 0, capacity)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use types::{config::Config, phase0::primitives::H160};

    use super::*;

    fn specs(yaml: &str) -> Specs {
        let config = Config::from_yaml_str(&format!("PRESET_BASE: \"minimal\"\n{yaml}"))
            .expect("config is valid");

        Specs::from_config(&config)
    }

    #[test]
    fn empty_deposit_tree_with_default_depth() {
        let root = compute_deposit_root(&specs("DEPOSIT_CONTRACT_TREE_DEPTH: 32\n"))
            .expect("deposit root is computable");

        assert_eq!(
            root,
            H256(hex!(
                "d70a234731285c6804c2a4f56711ddb8c82c99740f207854891028af34e27e5e"
            )),
        );
    }

    #[test]
    fn empty_deposit_tree_with_custom_depth_and_limit() {
        let root = compute_deposit_root(&specs(
            "DEPOSIT_CONTRACT_TREE_DEPTH: 5\nMAX_DEPOSITS_PER_PAYLOAD: 16\n",
        ))
        .expect("deposit root is computable");

        assert_eq!(
            root,
            H256(hex!(
                "792930bbd5baac43bcc798ee49aa8185ef76bb3b44ba62b91d86ae569e4bb535"
            )),
        );
    }

    #[test]
    fn empty_transactions_with_default_limits() {
        let root = compute_transactions_root(&[] as &[&[u8]], &specs(""))
            .expect("transactions root is computable");

        assert_eq!(
            root,
            H256(hex!(
                "7ffe241ea60187fdb0187bfa22de35d1f9bed7ab061d9401fd47e34a54fbede1"
            )),
        );
    }

    #[test]
    fn transaction_limits_are_enforced() {
        let transactions = [[0_u8; 8]; 3];

        let error = compute_transactions_root(
            &transactions,
            &specs("MAX_TRANSACTIONS_PER_PAYLOAD: 2\n"),
        )
        .expect_err("three transactions exceed the limit of two");
        assert!(error.to_string().contains("too long"));

        let error = compute_transactions_root(
            &transactions,
            &specs("MAX_BYTES_PER_TRANSACTION: 4\n"),
        )
        .expect_err("eight bytes exceed the limit of four");
        assert!(error.to_string().contains("transaction 0"));
    }

    #[test]
    fn empty_withdrawals_with_a_limit_of_16() {
        let root = compute_withdrawals_root(&[], &specs("MAX_WITHDRAWALS_PER_PAYLOAD: 16\n"))
            .expect("withdrawals root is computable");

        assert_eq!(
            root,
            H256(hex!(
                "792930bbd5baac43bcc798ee49aa8185ef76bb3b44ba62b91d86ae569e4bb535"
            )),
        );
    }

    #[test]
    fn single_withdrawal_matches_the_reference_root() {
        let withdrawals = [Withdrawal {
            index: 0,
            validator_index: 1,
            address: H160(hex!("1234567890123456789012345678901234567890")),
            amount: 32_000_000_000,
        }];

        let root =
            compute_withdrawals_root(&withdrawals, &specs("MAX_WITHDRAWALS_PER_PAYLOAD: 16\n"))
                .expect("withdrawals root is computable");

        assert_eq!(
            root,
            H256(hex!(
                "7f97a0dbe6d693e11d1f21f5602912eb22cc129a84232bc843474ff257f6e537"
            )),
        );
    }

    #[test]
    fn withdrawal_overflow_is_rejected() {
        let withdrawals = [Withdrawal::default(); 3];

        let error =
            compute_withdrawals_root(&withdrawals, &specs("MAX_WITHDRAWALS_PER_PAYLOAD: 2\n"))
                .expect_err("three withdrawals exceed the limit of two");

        assert!(error.to_string().contains("withdrawals list is too long"));
    }

    #[test]
    fn randao_mixes_repeat_the_genesis_block_hash() {
        let hash = H256::repeat_byte(0x42);
        let mixes = seed_randao_mixes(hash, &specs("EPOCHS_PER_HISTORICAL_VECTOR: 64\n"));

        assert_eq!(mixes.len(), 64);
        assert!(mixes.iter().all(|mix| *mix == hash));
    }
}
