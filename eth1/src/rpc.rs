use std::{fs, path::Path};

use alloy_consensus::TxEnvelope;
use alloy_eips::{eip2718::Encodable2718 as _, eip4895::Withdrawal};
use alloy_primitives::{Address, Bloom, Bytes, B256, U256};
use anyhow::{bail, Context as _, Result};
use serde::Deserialize;
use serde_json::json;

use crate::block::ExecutionBlock;

/// The JSON-RPC response envelope shadow-fork block files use.
#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: serde_json::Value,
    result: serde_json::Value,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// An `eth_getBlockByNumber` result with full transaction objects.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcBlock {
    hash: B256,
    parent_hash: B256,
    state_root: B256,
    receipts_root: B256,
    logs_bloom: Bloom,
    miner: Address,
    #[serde(with = "alloy_serde::quantity")]
    number: u64,
    #[serde(with = "alloy_serde::quantity")]
    gas_limit: u64,
    #[serde(with = "alloy_serde::quantity")]
    gas_used: u64,
    #[serde(with = "alloy_serde::quantity")]
    timestamp: u64,
    extra_data: Bytes,
    #[serde(default)]
    base_fee_per_gas: Option<U256>,
    #[serde(default, with = "alloy_serde::quantity::opt")]
    blob_gas_used: Option<u64>,
    #[serde(default, with = "alloy_serde::quantity::opt")]
    excess_blob_gas: Option<u64>,
    #[serde(default)]
    transactions: Vec<TxEnvelope>,
    #[serde(default)]
    withdrawals: Option<Vec<Withdrawal>>,
}

impl From<RpcBlock> for ExecutionBlock {
    fn from(block: RpcBlock) -> Self {
        let transactions = block
            .transactions
            .iter()
            .map(|transaction| transaction.encoded_2718().into())
            .collect();

        Self {
            hash: block.hash,
            parent_hash: block.parent_hash,
            state_root: block.state_root,
            receipts_root: block.receipts_root,
            logs_bloom: block.logs_bloom,
            coinbase: block.miner,
            number: block.number,
            gas_limit: block.gas_limit,
            gas_used: block.gas_used,
            timestamp: block.timestamp,
            extra_data: block.extra_data,
            base_fee_per_gas: block.base_fee_per_gas,
            blob_gas_used: block.blob_gas_used,
            excess_blob_gas: block.excess_blob_gas,
            transactions,
            withdrawals: block.withdrawals,
        }
    }
}

/// Loads a shadow-fork block from a local file or an HTTP(S) URL containing
/// a JSON-RPC response envelope.
pub fn load_block_from_file(location: &str) -> Result<ExecutionBlock> {
    let bytes = if location.starts_with("http://") || location.starts_with("https://") {
        reqwest::blocking::get(location)
            .and_then(reqwest::blocking::Response::bytes)
            .with_context(|| format!("failed to get block from URL {location}"))?
            .to_vec()
    } else {
        fs::read(Path::new(location))
            .with_context(|| format!("failed to read shadow fork block {location}"))?
    };

    let response = serde_json::from_slice::<JsonRpcResponse>(&bytes)
        .context("failed to decode JSON-RPC response")?;

    parse_block(response)
}

/// Fetches the chain head from a live JSON-RPC endpoint: the block number
/// first, then the full block with transactions.
pub fn load_block_from_rpc(url: &str) -> Result<ExecutionBlock> {
    let client = reqwest::blocking::Client::new();

    let number = call(&client, url, "eth_blockNumber", json!([]))?;
    let number = number
        .as_str()
        .context("eth_blockNumber did not return a quantity")?
        .to_owned();

    let result = call(&client, url, "eth_getBlockByNumber", json!([number, true]))?;

    parse_block(JsonRpcResponse {
        jsonrpc: "2.0".to_owned(),
        id: json!(1),
        result,
        error: None,
    })
}

fn call(
    client: &reqwest::blocking::Client,
    url: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<serde_json::Value> {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });

    let response = client
        .post(url)
        .json(&request)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .with_context(|| format!("{method} request to {url} failed"))?
        .json::<JsonRpcResponse>()
        .with_context(|| format!("failed to decode {method} response"))?;

    if let Some(error) = response.error {
        bail!("{method} returned an error: {error}");
    }

    Ok(response.result)
}

fn parse_block(response: JsonRpcResponse) -> Result<ExecutionBlock> {
    if let Some(error) = response.error {
        bail!("JSON-RPC response carries an error: {error}");
    }

    let block = serde_json::from_value::<RpcBlock>(response.result)
        .context("failed to parse eth1 block")?;

    Ok(block.into())
}
