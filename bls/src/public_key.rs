use blst::min_pk::{AggregatePublicKey as RawAggregatePublicKey, PublicKey as RawPublicKey};

use crate::{error::Error, public_key_bytes::PublicKeyBytes};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PublicKey(RawPublicKey);

impl TryFrom<PublicKeyBytes> for PublicKey {
    type Error = Error;

    #[inline]
    fn try_from(bytes: PublicKeyBytes) -> Result<Self, Self::Error> {
        let raw = RawPublicKey::uncompress(bytes.as_bytes()).map_err(|_| Error::InvalidPublicKey)?;

        // Uncompressing alone does not reject points outside the subgroup.
        // See <https://github.com/supranational/blst/issues/11>.
        raw.validate().map_err(|_| Error::InvalidPublicKey)?;

        Ok(Self(raw))
    }
}

impl From<PublicKey> for PublicKeyBytes {
    #[inline]
    fn from(public_key: PublicKey) -> Self {
        Self(public_key.0.compress())
    }
}

impl PublicKey {
    pub(crate) const fn as_raw(&self) -> &RawPublicKey {
        &self.0
    }

    pub(crate) const fn from_raw(raw: RawPublicKey) -> Self {
        Self(raw)
    }
}

/// Aggregates already validated public keys by point addition.
pub fn aggregate_public_keys<'keys>(
    keys: impl IntoIterator<Item = &'keys PublicKey>,
) -> Result<PublicKey, Error> {
    let raw_keys = keys.into_iter().map(PublicKey::as_raw).collect::<Vec<_>>();

    if raw_keys.is_empty() {
        return Err(Error::NoPublicKeysToAggregate);
    }

    let aggregate = RawAggregatePublicKey::aggregate(&raw_keys, false)
        .map_err(|_| Error::InvalidPublicKey)?;

    Ok(PublicKey(aggregate.to_public_key()))
}
