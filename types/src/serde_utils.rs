//! Serialization helpers for the canonical JSON rendering of beacon types:
//! unsigned integers become decimal strings and byte strings become
//! `0x`-prefixed hex, matching the standard beacon API encoding.

pub mod u64_string {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }
}

pub mod u64_string_sequence {
    use serde::{ser::SerializeSeq as _, Serializer};

    pub fn serialize<S: Serializer>(values: &[u64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut sequence = serializer.serialize_seq(Some(values.len()))?;

        for value in values {
            sequence.serialize_element(&value.to_string())?;
        }

        sequence.end()
    }
}

pub mod u8_string_sequence {
    use serde::{ser::SerializeSeq as _, Serializer};

    pub fn serialize<S: Serializer>(values: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let mut sequence = serializer.serialize_seq(Some(values.len()))?;

        for value in values {
            sequence.serialize_element(&value.to_string())?;
        }

        sequence.end()
    }
}

pub mod hex_bytes {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        bytes: impl AsRef<[u8]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("0x{}", hex::encode(bytes.as_ref())))
    }
}

pub mod u256_string {
    use ethereum_types::U256;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.to_string())
    }
}

/// Decimal rendering of a 256-bit value stored as little-endian bytes.
pub mod le_uint256_string {
    use ethereum_types::{H256, U256};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &H256, serializer: S) -> Result<S::Ok, S::Error> {
        let value = U256::from_little_endian(value.as_bytes());
        serializer.collect_str(&value.to_string())
    }
}
