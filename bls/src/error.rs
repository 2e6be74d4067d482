use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("public key is not a valid point on BLS12-381")]
    InvalidPublicKey,
    #[error("secret key is not a valid BLS12-381 scalar")]
    InvalidSecretKey,
    #[error("cannot aggregate an empty set of public keys")]
    NoPublicKeysToAggregate,
}
