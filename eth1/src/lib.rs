//! Execution-layer inputs: the EL genesis description and shadow-fork
//! blocks. Everything downstream consumes the narrow [`ExecutionBlock`]
//! interface instead of raw RPC or genesis documents.

pub use crate::{
    block::ExecutionBlock,
    genesis::{genesis_to_block, load_genesis_file},
    rpc::{load_block_from_file, load_block_from_rpc},
};

mod block;
mod genesis;
mod rpc;
mod state_root;
