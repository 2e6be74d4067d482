use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context as _, Result};
use thiserror::Error;

/// A consensus configuration scalar, coerced once at load time.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Value {
    Uint(u64),
    Bytes(Vec<u8>),
    String(String),
}

/// Runtime consensus configuration: explicit values layered over the preset
/// named by `PRESET_BASE`. Lookups check the explicit layer first.
#[derive(Default, Debug)]
pub struct Config {
    values: BTreeMap<String, Value>,
    preset: BTreeMap<String, Value>,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("PRESET_BASE is missing from the configuration")]
    MissingPresetBase,
    #[error("preset {name:?} not found")]
    UnknownPreset { name: String },
    #[error("invalid hex value for {key}")]
    InvalidHex {
        key: String,
        source: hex::FromHexError,
    },
}

const PRESETS: &[(&str, &str)] = &[
    ("mainnet", include_str!("presets/mainnet.yaml")),
    ("minimal", include_str!("presets/minimal.yaml")),
];

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("failed to read consensus config {}", path.display()))?;

        Self::from_yaml_str(&yaml)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let document = serde_yaml::from_str::<BTreeMap<String, serde_yaml::Value>>(yaml)
            .context("failed to parse consensus config")?;

        let mut values = BTreeMap::new();

        for (key, value) in document {
            if let Some(coerced) = coerce_scalar(&key, value)? {
                values.insert(key, coerced);
            }
        }

        let mut config = Self {
            values,
            preset: BTreeMap::new(),
        };

        let preset_name = config
            .get_string("PRESET_BASE")
            .ok_or(Error::MissingPresetBase)?
            .to_owned();

        let preset_yaml = PRESETS
            .iter()
            .find(|(name, _)| **name == preset_name)
            .map(|(_, yaml)| *yaml)
            .ok_or(Error::UnknownPreset { name: preset_name })?;

        let preset_document = serde_yaml::from_str::<BTreeMap<String, serde_yaml::Value>>(preset_yaml)
            .context("failed to parse embedded preset")?;

        for (key, value) in preset_document {
            if let Some(coerced) = coerce_scalar(&key, value)? {
                config.preset.insert(key, coerced);
            }
        }

        Ok(config)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).or_else(|| self.preset.get(key))
    }

    #[must_use]
    pub fn get_uint(&self, key: &str) -> Option<u64> {
        match self.get(key) {
            Some(Value::Uint(value)) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_uint_default(&self, key: &str, default: u64) -> u64 {
        self.get_uint(key).unwrap_or(default)
    }

    #[must_use]
    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        match self.get(key) {
            Some(Value::Bytes(bytes)) => Some(bytes),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_bytes_default<'config>(
        &'config self,
        key: &str,
        default: &'config [u8],
    ) -> &'config [u8] {
        self.get_bytes(key).unwrap_or(default)
    }

    #[must_use]
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    /// The flattened view of the configuration: preset values with explicit
    /// values layered on top. Dynamic-capacity hashing and serialization
    /// resolve their limits against this mapping, captured as a
    /// [`Specs`](crate::specs::Specs) table.
    #[must_use]
    pub fn specs(&self) -> BTreeMap<String, Value> {
        let mut specs = self.preset.clone();
        specs.extend(self.values.clone());
        specs
    }
}

/// Applies the load-time coercion rules: hex-prefixed strings become byte
/// strings, all-digit strings become `u64`, and integers under a
/// `*_FORK_VERSION` key become 4-byte big-endian byte strings. Values of
/// any other YAML type are dropped, leaving the key unset.
fn coerce_scalar(key: &str, value: serde_yaml::Value) -> Result<Option<Value>, Error> {
    match value {
        serde_yaml::Value::Number(number) => {
            let Some(uint) = number.as_u64() else {
                return Ok(None);
            };

            if key.ends_with("_FORK_VERSION") {
                #[allow(clippy::cast_possible_truncation)]
                let version = (uint as u32).to_be_bytes();
                Ok(Some(Value::Bytes(version.to_vec())))
            } else {
                Ok(Some(Value::Uint(uint)))
            }
        }
        serde_yaml::Value::String(string) => {
            if let Some(digits) = string.strip_prefix("0x") {
                let bytes = hex::decode(digits).map_err(|source| Error::InvalidHex {
                    key: key.to_owned(),
                    source,
                })?;

                Ok(Some(Value::Bytes(bytes)))
            } else if let Ok(uint) = string.parse() {
                Ok(Some(Value::Uint(uint)))
            } else {
                Ok(Some(Value::String(string)))
            }
        }
        _ => Ok(None),
    }
}
