use std::collections::BTreeMap;

use crate::config::{Config, Value};

/// The flattened consensus specification: [`Config::specs`] captured once,
/// with typed lookups. Merkleization and serialization resolve their
/// runtime capacities against this table rather than against the layered
/// configuration directly.
#[derive(Default, Debug)]
pub struct Specs {
    values: BTreeMap<String, Value>,
}

impl Specs {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            values: config.specs(),
        }
    }

    #[must_use]
    pub fn get_uint(&self, key: &str) -> Option<u64> {
        match self.values.get(key) {
            Some(Value::Uint(value)) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_uint_default(&self, key: &str, default: u64) -> u64 {
        self.get_uint(key).unwrap_or(default)
    }

    #[must_use]
    pub fn get_bytes_default<'specs>(
        &'specs self,
        key: &str,
        default: &'specs [u8],
    ) -> &'specs [u8] {
        match self.values.get(key) {
            Some(Value::Bytes(bytes)) => bytes,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_table_sees_explicit_values_over_the_preset() {
        let config = Config::from_yaml_str(
            "PRESET_BASE: \"mainnet\"\nSYNC_COMMITTEE_SIZE: \"32\"\n",
        )
        .expect("config is valid");

        let specs = Specs::from_config(&config);

        assert_eq!(specs.get_uint("SYNC_COMMITTEE_SIZE"), Some(32));
        assert_eq!(specs.get_uint("EPOCHS_PER_HISTORICAL_VECTOR"), Some(65_536));
        assert_eq!(specs.get_uint_default("MAX_DEPOSITS_PER_PAYLOAD", 7), 7);
        assert_eq!(
            specs.get_bytes_default("DOMAIN_SYNC_COMMITTEE", &[7, 0, 0, 0]),
            [7, 0, 0, 0],
        );
    }
}
