use std::{
    fs,
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
};

use anyhow::{Context as _, Result};
use rayon::iter::{IntoParallelIterator as _, ParallelIterator as _};
use serde::Deserialize;
use tracing::info;
use types::phase0::primitives::H256;

use crate::{derivation, Error, Validator};

/// One mnemonic record: derive `count` validators starting at key index
/// `start`, with optional balance and withdrawal-credential overrides.
#[derive(Clone, Default, Debug, Deserialize)]
pub struct MnemonicSource {
    pub mnemonic: String,
    #[serde(default)]
    pub start: u64,
    pub count: u64,
    #[serde(default)]
    pub balance: u64,
    #[serde(default)]
    pub wd_address: String,
    #[serde(default)]
    pub wd_prefix: String,
    #[serde(default)]
    pub wd_key_path: String,
}

pub fn generate_from_mnemonics_file(path: impl AsRef<Path>) -> Result<Vec<Validator>> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("failed to read mnemonics file {}", path.display()))?;

    let sources =
        serde_yaml::from_str::<Vec<MnemonicSource>>(&yaml).context("failed to parse mnemonics")?;

    generate_from_sources(&sources)
}

/// Derives validators for every record in order. Records are processed
/// sequentially; derivations within one record run in parallel with their
/// output slots fixed up front, so completion order cannot reorder results.
pub fn generate_from_sources(sources: &[MnemonicSource]) -> Result<Vec<Validator>> {
    let mut validators = vec![];

    for (index, source) in sources.iter().enumerate() {
        info!(
            "processing mnemonic {index}, for {count} validators",
            count = source.count,
        );

        let seed =
            derivation::seed_from_mnemonic(&source.mnemonic).map_err(|_| Error::BadMnemonic { index })?;

        let progress = AtomicU64::new(0);

        let mut derived = (0..source.count)
            .into_par_iter()
            .map(|offset| {
                let validator = derive_validator(&seed, source, source.start + offset)?;

                let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
                if done % 100 == 0 {
                    info!("...validator {done}/{count}", count = source.count);
                }

                Ok(validator)
            })
            .collect::<Result<Vec<_>, Error>>()?;

        validators.append(&mut derived);
    }

    Ok(validators)
}

fn derive_validator(seed: &[u8], source: &MnemonicSource, key_index: u64) -> Result<Validator, Error> {
    let signing_key =
        derivation::derive_secret_key(seed, &format!("m/12381/3600/{key_index}/0/0"))?;
    let public_key = signing_key.to_public_key().into();

    let mut credentials = H256::zero();

    if !source.wd_prefix.is_empty() && source.wd_prefix != "0x00" && !source.wd_address.is_empty() {
        // Withdrawals go to an execution address (0x01 or 0x02 credentials).
        let address = decode_hex(&source.wd_address).ok_or(Error::InvalidWithdrawalAddress)?;

        if address.len() != 20 {
            return Err(Error::InvalidWithdrawalAddress);
        }

        credentials.as_bytes_mut()[12..].copy_from_slice(&address);
        credentials.as_bytes_mut()[0] = 0x01;
    } else {
        // Withdrawals are controlled by a derived BLS key (0x00 credentials).
        let withdrawal_path = if source.wd_key_path.is_empty() {
            format!("m/12381/3600/{key_index}/0")
        } else {
            source.wd_key_path.clone()
        };

        let withdrawal_key = derivation::derive_secret_key(seed, &withdrawal_path)?;
        let withdrawal_public_key = bls::PublicKeyBytes::from(withdrawal_key.to_public_key());

        credentials = hashing::hash_384(withdrawal_public_key);
        credentials.as_bytes_mut()[0] = 0x00;
    }

    // An explicit prefix always wins, even over the 0x01 written above.
    if !source.wd_prefix.is_empty() {
        let prefix = decode_hex(&source.wd_prefix).ok_or(Error::InvalidWithdrawalPrefix)?;
        let length = prefix.len().min(32);
        credentials.as_bytes_mut()[..length].copy_from_slice(&prefix[..length]);
    }

    Ok(Validator {
        public_key,
        withdrawal_credentials: credentials,
        balance: (source.balance > 0).then_some(source.balance),
    })
}

fn decode_hex(digits: &str) -> Option<Vec<u8>> {
    hex::decode(digits.strip_prefix("0x").unwrap_or(digits)).ok()
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use bls::PublicKeyBytes;

    use super::*;

    const TEST_MNEMONIC: &str =
        "rare observe fox place unfold bargain cannon direct title sorry rabbit juice \
         body autumn quality decrease mixture transfer crisp unveil path depend brick scissors";

    fn source(start: u64, count: u64) -> MnemonicSource {
        MnemonicSource {
            mnemonic: TEST_MNEMONIC.to_owned(),
            start,
            count,
            ..MnemonicSource::default()
        }
    }

    #[test]
    fn derives_bls_withdrawal_credentials_by_default() {
        let mut record = source(0, 1);
        record.balance = 32_000_000_000;
        record.wd_prefix = "0x00".to_owned();

        let validators = generate_from_sources(&[record]).expect("record is valid");

        assert_eq!(validators.len(), 1);
        assert_eq!(
            validators[0].public_key,
            PublicKeyBytes(hex!(
                "a72ce460a5ab6bea347e59b17ee349bebf6adfa0a240993ed70a5be0da9638b6e2dc7bbdd19e24a8292c1c7b30f23c9e"
            )),
        );
        assert_eq!(
            validators[0].withdrawal_credentials,
            H256(hex!(
                "00844164a875d32ab3dd1388fb80f3376542726289c4d0a3d4270783b415b9d2"
            )),
        );
        assert_eq!(validators[0].balance, Some(32_000_000_000));
    }

    #[test]
    fn address_records_get_eth1_style_credentials() {
        let mut record = source(1, 1);
        record.balance = 64_000_000_000;
        record.wd_prefix = "0x01".to_owned();
        record.wd_address = "0x1234567890abcdef1234567890abcdef12345678".to_owned();

        let validators = generate_from_sources(&[record]).expect("record is valid");

        assert_eq!(
            validators[0].public_key,
            PublicKeyBytes(hex!(
                "95300f69c73a64191af69b572724d3da8fa1dd62a0f9db32c2290ef358c2ab93006a50006d7fadffd8de583109a4446e"
            )),
        );
        assert_eq!(
            validators[0].withdrawal_credentials,
            H256(hex!(
                "0100000000000000000000001234567890abcdef1234567890abcdef12345678"
            )),
        );
    }

    #[test]
    fn an_explicit_prefix_overrides_the_credential_type() {
        let mut record = source(10, 1);
        record.wd_prefix = "0x02".to_owned();
        record.wd_address = "0x1234567890abcdef1234567890abcdef12345678".to_owned();

        let validators = generate_from_sources(&[record]).expect("record is valid");

        assert_eq!(
            validators[0].public_key,
            PublicKeyBytes(hex!(
                "81d086791ed8538f023575b7af4cffbbf1cfa3cf017bab1aa8fb50a858a1554b269a169d9124953046b28fd5da0353aa"
            )),
        );
        assert_eq!(
            validators[0].withdrawal_credentials,
            H256(hex!(
                "0200000000000000000000001234567890abcdef1234567890abcdef12345678"
            )),
        );
        assert_eq!(validators[0].balance, None, "zero balance stays unset");
    }

    #[test]
    fn records_are_concatenated_in_order() {
        let validators =
            generate_from_sources(&[source(0, 2), source(10, 1)]).expect("records are valid");

        assert_eq!(validators.len(), 3);
        assert_eq!(
            validators[0].public_key,
            PublicKeyBytes(hex!(
                "a72ce460a5ab6bea347e59b17ee349bebf6adfa0a240993ed70a5be0da9638b6e2dc7bbdd19e24a8292c1c7b30f23c9e"
            )),
        );
    }

    #[test]
    fn invalid_mnemonics_are_reported_by_record_index() {
        let mut record = source(0, 1);
        record.mnemonic = "rare observe invalid_word".to_owned();

        let error = generate_from_sources(&[source(0, 1), record])
            .expect_err("second mnemonic is invalid");

        assert_eq!(error.to_string(), "mnemonic 1 is bad");
    }

    #[test]
    fn out_of_range_key_indices_fail() {
        let error = generate_from_sources(&[source(u64::MAX / 2, 1)])
            .expect_err("key index exceeds u32");

        assert!(error.to_string().contains("invalid index"));
    }

    #[test]
    fn malformed_withdrawal_fields_fail() {
        let mut record = source(0, 1);
        record.wd_prefix = "0x01".to_owned();
        record.wd_address = "invalid_address".to_owned();

        let error = generate_from_sources(&[record]).expect_err("address is not hex");
        assert!(error.to_string().contains("withdrawal address"));

        let mut record = source(0, 1);
        record.wd_prefix = "invalid_prefix".to_owned();

        let error = generate_from_sources(&[record]).expect_err("prefix is not hex");
        assert!(error.to_string().contains("withdrawal prefix"));
    }
}
