use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context as _, Result};
use bls::PublicKeyBytes;
use types::phase0::primitives::H256;

use crate::{Error, Validator};

/// Loads validators from a line-oriented text file.
///
/// Each non-blank, non-comment line is `pubkey_hex:credentials_hex` with an
/// optional `:balance` in gwei. Duplicate public keys are rejected with both
/// offending line numbers.
pub fn load_validators_file(path: impl AsRef<Path>) -> Result<Vec<Validator>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read validators file {}", path.display()))?;

    parse_validators(&contents).map_err(Into::into)
}

fn parse_validators(contents: &str) -> Result<Vec<Validator>, Error> {
    let mut validators = vec![];
    let mut seen_pubkeys = HashMap::new();

    for (line, line_number) in contents.lines().zip(1..) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split(':');

        let public_key = decode_hex(parts.next().unwrap_or_default(), line_number)?;
        let public_key = <[u8; bls::COMPRESSED_SIZE]>::try_from(public_key)
            .map(PublicKeyBytes)
            .map_err(|_| Error::InvalidPubkeyLength { line: line_number })?;

        if let Some(first_line) = seen_pubkeys.insert(public_key, line_number) {
            return Err(Error::DuplicatePubkey {
                first_line,
                line: line_number,
            });
        }

        let credentials = parts
            .next()
            .ok_or(Error::MissingCredentials { line: line_number })?;
        let credentials = decode_hex(credentials, line_number)?;
        let withdrawal_credentials = <[u8; 32]>::try_from(credentials)
            .map(H256)
            .map_err(|_| Error::InvalidCredentialsLength { line: line_number })?;

        validate_credentials(withdrawal_credentials, line_number)?;

        let balance = parts
            .next()
            .map(|digits| {
                digits
                    .parse()
                    .map_err(|_| Error::InvalidBalance { line: line_number })
            })
            .transpose()?;

        validators.push(Validator {
            public_key,
            withdrawal_credentials,
            balance,
        });
    }

    Ok(validators)
}

fn validate_credentials(credentials: H256, line: usize) -> Result<(), Error> {
    match credentials[0] {
        0x00 => Ok(()),
        0x01 | 0x02 => {
            if credentials[1..12].iter().all(|byte| *byte == 0) {
                Ok(())
            } else {
                Err(Error::InvalidCredentialsPadding { line })
            }
        }
        _ => Err(Error::InvalidCredentialsType { line }),
    }
}

fn decode_hex(digits: &str, line: usize) -> Result<Vec<u8>, Error> {
    hex::decode(digits.strip_prefix("0x").unwrap_or(digits))
        .map_err(|source| Error::InvalidHex { line, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBKEY_A: &str = "0x111111111111111111111111111111111111111111111111\
                            111111111111111111111111111111111111111111111111";
    const PUBKEY_B: &str = "0x222222222222222222222222222222222222222222222222\
                            222222222222222222222222222222222222222222222222";

    fn line(pubkey: &str, credentials: &str, balance: Option<&str>) -> String {
        match balance {
            Some(balance) => format!("{pubkey}:{credentials}:{balance}"),
            None => format!("{pubkey}:{credentials}"),
        }
    }

    #[test]
    fn parses_validators_with_and_without_balances() {
        let bls_credentials = format!("0x00{}", "11".repeat(31));
        let address_credentials = format!("0x01{}{}", "00".repeat(11), "22".repeat(20));

        let contents = format!(
            "# comment\n\n{}\n{}\n",
            line(PUBKEY_A, &bls_credentials, None),
            line(PUBKEY_B, &address_credentials, Some("16000000000")),
        );

        let validators = parse_validators(&contents).expect("file is valid");

        assert_eq!(validators.len(), 2);
        assert_eq!(validators[0].balance, None);
        assert_eq!(validators[0].withdrawal_credentials[0], 0x00);
        assert_eq!(validators[1].balance, Some(16_000_000_000));
        assert_eq!(validators[1].withdrawal_credentials[0], 0x01);
    }

    #[test]
    fn duplicate_pubkeys_report_both_lines() {
        let credentials = format!("0x00{}", "11".repeat(31));

        let contents = format!(
            "{}\n{}\n{}\n",
            line(PUBKEY_A, &credentials, None),
            line(PUBKEY_B, &credentials, None),
            line(PUBKEY_A, &credentials, None),
        );

        let error = parse_validators(&contents).expect_err("duplicate pubkey");

        assert_eq!(
            error.to_string(),
            "duplicate pubkey on line 1 and 3",
        );
    }

    #[test]
    fn credential_type_and_padding_are_validated() {
        let bad_type = format!("0x03{}", "00".repeat(31));
        let error = parse_validators(&line(PUBKEY_A, &bad_type, None))
            .expect_err("credential type 0x03 is illegal");
        assert!(error.to_string().contains("invalid type"));

        let bad_padding = format!("0x01{}{}", "01".repeat(11), "22".repeat(20));
        let error = parse_validators(&line(PUBKEY_A, &bad_padding, None))
            .expect_err("0x01 credentials must zero bytes 1..12");
        assert!(error.to_string().contains("invalid 0x01/0x02 cred"));
    }

    #[test]
    fn truncated_pubkeys_are_rejected() {
        let credentials = format!("0x00{}", "11".repeat(31));
        let error = parse_validators(&line("0xabcd", &credentials, None))
            .expect_err("pubkey is too short");

        assert!(error.to_string().contains("invalid length"));
    }
}
