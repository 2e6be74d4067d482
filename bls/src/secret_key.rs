use blst::min_pk::SecretKey as RawSecretKey;

use crate::{error::Error, public_key::PublicKey, SECRET_KEY_SIZE};

pub struct SecretKey(RawSecretKey);

impl SecretKey {
    /// Interprets 32 big-endian bytes as a secret scalar.
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_SIZE]) -> Result<Self, Error> {
        RawSecretKey::from_bytes(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidSecretKey)
    }

    #[must_use]
    pub fn to_public_key(&self) -> PublicKey {
        PublicKey::from_raw(self.0.sk_to_pk())
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use crate::PublicKeyBytes;

    use super::*;

    // The first key pair of the interop mocked-start standard.
    #[test]
    fn public_keys_are_derived_in_eth_mode() {
        let secret_key = SecretKey::from_bytes(&hex!(
            "25295f0d1d592a90b333e26e85149708208e9f8e8bc18f6c77bd62f8ad7a6866"
        ))
        .expect("secret key is below the curve order");

        assert_eq!(
            PublicKeyBytes::from(secret_key.to_public_key()),
            PublicKeyBytes(hex!(
                "a99a76ed7796f7be22d5b7e85deeb7c5677e88e511e0b337618f8c4eb61349b4bf2d153f649f7b53359fe8b94a38e44c"
            )),
        );
    }

    #[test]
    fn zero_scalars_are_rejected() {
        assert_eq!(
            SecretKey::from_bytes(&[0; SECRET_KEY_SIZE]).map(|_| ()),
            Err(Error::InvalidSecretKey),
        );
    }
}
