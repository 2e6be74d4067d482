//! Thin wrappers around `blst` for the BLS12-381 operations this project
//! needs: secret key to public key conversion, public key validation, and
//! public key aggregation in ETH serialization mode.

pub use crate::{
    error::Error,
    public_key::{aggregate_public_keys, PublicKey},
    public_key_bytes::PublicKeyBytes,
    secret_key::SecretKey,
    signature_bytes::SignatureBytes,
};

mod error;
mod public_key;
mod public_key_bytes;
mod secret_key;
mod signature_bytes;

pub const COMPRESSED_SIZE: usize = 48;
pub const SECRET_KEY_SIZE: usize = 32;
pub const SIGNATURE_SIZE: usize = 96;
