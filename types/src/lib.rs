pub mod altair;
pub mod bellatrix;
pub mod capella;
pub mod combined;
pub mod config;
pub mod deneb;
pub mod electra;
pub mod nonstandard;
pub mod phase0;
pub mod serde_utils;
pub mod specs;

mod ssz_buffer;
