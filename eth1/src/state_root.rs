use std::collections::BTreeMap;

use alloy_genesis::GenesisAccount;
use alloy_primitives::{keccak256, Address, B256, KECCAK256_EMPTY, U256};
use alloy_rlp::{Encodable as _, RlpEncodable};
use alloy_trie::{HashBuilder, Nibbles, EMPTY_ROOT_HASH};

#[derive(RlpEncodable)]
struct TrieAccount {
    nonce: u64,
    balance: U256,
    storage_root: B256,
    code_hash: B256,
}

/// State root of the genesis allocation: a secure trie of RLP-encoded
/// accounts keyed by hashed address, each with its own storage subtrie.
pub fn genesis_state_root(alloc: &BTreeMap<Address, GenesisAccount>) -> B256 {
    let mut leaves = alloc
        .iter()
        .map(|(address, account)| {
            let account = TrieAccount {
                nonce: account.nonce.unwrap_or_default(),
                balance: account.balance,
                storage_root: account
                    .storage
                    .as_ref()
                    .map(storage_root)
                    .unwrap_or(EMPTY_ROOT_HASH),
                code_hash: account
                    .code
                    .as_ref()
                    .map(keccak256)
                    .unwrap_or(KECCAK256_EMPTY),
            };

            let mut encoded = Vec::new();
            account.encode(&mut encoded);

            (keccak256(address), encoded)
        })
        .collect::<Vec<_>>();

    trie_root(&mut leaves)
}

fn storage_root(storage: &BTreeMap<B256, B256>) -> B256 {
    let mut leaves = storage
        .iter()
        .filter(|(_, value)| **value != B256::ZERO)
        .map(|(slot, value)| {
            let value = U256::from_be_bytes(value.0);

            let mut encoded = Vec::new();
            value.encode(&mut encoded);

            (keccak256(slot), encoded)
        })
        .collect::<Vec<_>>();

    trie_root(&mut leaves)
}

fn trie_root(leaves: &mut Vec<(B256, Vec<u8>)>) -> B256 {
    // `HashBuilder` requires keys in ascending nibble order.
    leaves.sort_by(|(left, _), (right, _)| left.cmp(right));

    let mut builder = HashBuilder::default();

    for (hashed_key, encoded) in leaves.iter() {
        builder.add_leaf(Nibbles::unpack(hashed_key), encoded);
    }

    builder.root()
}
