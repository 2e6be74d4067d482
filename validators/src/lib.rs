//! Sources of genesis validators: a line-oriented validators file and
//! hierarchical-deterministic derivation from mnemonic records.

use bls::PublicKeyBytes;
use thiserror::Error;
use types::phase0::primitives::{Gwei, H256};

pub use crate::{
    derivation::{derive_secret_key, seed_from_mnemonic},
    file::load_validators_file,
    mnemonic::{generate_from_mnemonics_file, generate_from_sources, MnemonicSource},
};

mod derivation;
mod file;
mod mnemonic;

/// An input validator before consensus-side processing. The balance is in
/// gwei and falls back to `MAX_EFFECTIVE_BALANCE` downstream when absent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Validator {
    pub public_key: PublicKeyBytes,
    pub withdrawal_credentials: H256,
    pub balance: Option<Gwei>,
}

#[derive(Debug, Error)]
pub enum Error {
    // Validators file
    #[error("invalid hex on line {line}: {source}")]
    InvalidHex {
        line: usize,
        source: hex::FromHexError,
    },
    #[error("invalid pubkey (invalid length) on line {line}")]
    InvalidPubkeyLength { line: usize },
    #[error("missing withdrawal credentials on line {line}")]
    MissingCredentials { line: usize },
    #[error("invalid withdrawal credentials (invalid length) on line {line}")]
    InvalidCredentialsLength { line: usize },
    #[error("invalid withdrawal credentials (invalid type) on line {line}")]
    InvalidCredentialsType { line: usize },
    #[error("invalid withdrawal credentials (invalid 0x01/0x02 cred) on line {line}")]
    InvalidCredentialsPadding { line: usize },
    #[error("invalid balance on line {line}")]
    InvalidBalance { line: usize },
    #[error("duplicate pubkey on line {first_line} and {line}")]
    DuplicatePubkey { first_line: usize, line: usize },

    // Mnemonic source
    #[error("mnemonic {index} is bad")]
    BadMnemonic { index: usize },
    #[error("mnemonic is not valid")]
    InvalidMnemonic,
    #[error("failed to decode withdrawal address")]
    InvalidWithdrawalAddress,
    #[error("failed to decode withdrawal prefix")]
    InvalidWithdrawalPrefix,

    // Key derivation
    #[error("key path {path:?} does not start with m")]
    PathMissingRoot { path: String },
    #[error("invalid index {component:?} in key path {path:?}")]
    InvalidPathComponent { path: String, component: String },
    #[error(transparent)]
    Bls(#[from] bls::Error),
}
