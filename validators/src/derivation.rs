use bip39::Mnemonic;
use bls::SecretKey;
use hex_literal::hex;
use hkdf::Hkdf;
use num_bigint::BigUint;
use sha2::{Digest as _, Sha256};

use crate::Error;

/// Order of the BLS12-381 subgroup, big-endian.
const CURVE_ORDER: &[u8] = &hex!("73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001");

const LAMPORT_CHUNKS: usize = 255;
const SECRET_LENGTH: usize = 32;

/// Extracts the 64-byte BIP-39 seed from a mnemonic phrase with an empty
/// passphrase.
pub fn seed_from_mnemonic(phrase: &str) -> Result<[u8; 64], Error> {
    let mnemonic = Mnemonic::parse_normalized(phrase.trim()).map_err(|_| Error::InvalidMnemonic)?;
    Ok(mnemonic.to_seed_normalized(""))
}

/// Derives a BLS secret key from a seed and an EIP-2334 style path such as
/// `m/12381/3600/0/0/0`. Every component must fit in a `u32`.
pub fn derive_secret_key(seed: &[u8], path: &str) -> Result<SecretKey, Error> {
    let mut components = path.split('/');

    if components.next() != Some("m") {
        return Err(Error::PathMissingRoot {
            path: path.to_owned(),
        });
    }

    let mut secret = hkdf_mod_r(seed);

    for component in components {
        let index = component
            .parse()
            .map_err(|_| Error::InvalidPathComponent {
                path: path.to_owned(),
                component: component.to_owned(),
            })?;

        secret = hkdf_mod_r(&parent_to_lamport_public_key(&secret, index));
    }

    SecretKey::from_bytes(&secret).map_err(Into::into)
}

/// `hkdf_mod_r` from EIP-2333: maps input key material onto a nonzero
/// scalar below the curve order.
fn hkdf_mod_r(input_key_material: &[u8]) -> [u8; SECRET_LENGTH] {
    let order = BigUint::from_bytes_be(CURVE_ORDER);
    let mut salt = b"BLS-SIG-KEYGEN-SALT-".to_vec();

    let mut keyed_input = input_key_material.to_vec();
    keyed_input.push(0);

    loop {
        salt = Sha256::digest(&salt).to_vec();

        let (_, expander) = Hkdf::<Sha256>::extract(Some(&salt), &keyed_input);
        let mut output = [0; 48];
        expander
            .expand(&48_u16.to_be_bytes(), &mut output)
            .expect("48 bytes is a valid HKDF output length");

        let secret = BigUint::from_bytes_be(&output) % &order;

        if secret.bits() != 0 {
            let unpadded = secret.to_bytes_be();
            let mut padded = [0; SECRET_LENGTH];
            padded[SECRET_LENGTH - unpadded.len()..].copy_from_slice(&unpadded);
            return padded;
        }
    }
}

/// `parent_SK_to_lamport_PK` from EIP-2333.
fn parent_to_lamport_public_key(parent_secret: &[u8; SECRET_LENGTH], index: u32) -> [u8; 32] {
    let salt = index.to_be_bytes();

    let mut flipped = *parent_secret;
    for byte in &mut flipped {
        *byte = !*byte;
    }

    let mut hasher = Sha256::new();

    for chunk in lamport_chunks(parent_secret, &salt)
        .chunks_exact(SECRET_LENGTH)
        .chain(lamport_chunks(&flipped, &salt).chunks_exact(SECRET_LENGTH))
    {
        hasher.update(Sha256::digest(chunk));
    }

    hasher.finalize().into()
}

/// `IKM_to_lamport_SK` from EIP-2333: 255 chunks of 32 bytes.
fn lamport_chunks(input_key_material: &[u8; SECRET_LENGTH], salt: &[u8]) -> Vec<u8> {
    let (_, expander) = Hkdf::<Sha256>::extract(Some(salt), input_key_material);
    let mut output = vec![0; LAMPORT_CHUNKS * SECRET_LENGTH];
    expander
        .expand(&[], &mut output)
        .expect("8160 bytes is the maximum HKDF output length");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test case 0 of EIP-2333.
    const SEED: &[u8] = &hex!(
        "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553
         1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
    );

    #[test]
    fn master_and_child_keys_match_the_eip_2333_vectors() {
        let master = hkdf_mod_r(SEED);

        assert_eq!(
            BigUint::from_bytes_be(&master).to_string(),
            "6083874454709270928345386274498605044986640685124978867557563392430687146096",
        );

        let child = hkdf_mod_r(&parent_to_lamport_public_key(&master, 0));

        assert_eq!(
            BigUint::from_bytes_be(&child).to_string(),
            "20397789859736650942317412262472558107875392172444076792671091975210932703118",
        );
    }

    #[test]
    fn paths_must_be_rooted_and_within_u32() {
        assert!(matches!(
            derive_secret_key(SEED, "12381/3600/0/0"),
            Err(Error::PathMissingRoot { .. }),
        ));

        assert!(matches!(
            derive_secret_key(SEED, "m/12381/3600/9223372036854775807/0/0"),
            Err(Error::InvalidPathComponent { .. }),
        ));

        assert!(matches!(
            derive_secret_key(SEED, "m/12381/not_a_number"),
            Err(Error::InvalidPathComponent { .. }),
        ));
    }

    #[test]
    fn derivation_accepts_the_standard_validator_paths() {
        derive_secret_key(SEED, "m/12381/3600/0/0/0").expect("signing path is valid");
        derive_secret_key(SEED, "m/12381/3600/0/0").expect("withdrawal path is valid");
    }
}
