//! Base Driver Module
//!
//! Prefix and codec shared by concrete drivers. Holds no store logic.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyNamespacer;
use crate::codec::Packer;
use crate::error::{CacheError, Result};

/// A batch entry ready for the store: (caller key, store key, packed value).
pub type PackedEntry = (String, String, Vec<u8>);

// == Base Driver ==
#[derive(Debug, Clone)]
pub struct BaseDriver<P> {
    keys: KeyNamespacer,
    packer: P,
}

impl<P> BaseDriver<P> {
    pub fn keys(&self) -> &KeyNamespacer {
        &self.keys
    }

    pub fn packer(&self) -> &P {
        &self.packer
    }
}

impl<P: Packer> BaseDriver<P> {
    pub fn new(prefix: &str, packer: P) -> Self {
        Self {
            keys: KeyNamespacer::new(prefix),
            packer,
        }
    }

    pub fn cache_key(&self, key: &str) -> Result<String> {
        self.keys.qualify(key)
    }

    pub fn pack<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        self.packer.pack(value)
    }

    pub fn unpack<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        self.packer.unpack(bytes)
    }

    // == Pack Mapping ==
    /// Validates a key/value mapping and packs every value.
    ///
    /// The input is only a mapping when each key is non-empty and appears
    /// once; anything else is rejected before a single value is encoded.
    pub fn pack_mapping<I, K, V>(&self, values: I) -> Result<Vec<PackedEntry>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        let pairs: Vec<(String, V)> = values
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();

        let mut seen = HashSet::with_capacity(pairs.len());
        let mut cache_keys = Vec::with_capacity(pairs.len());
        for (key, _) in &pairs {
            if !seen.insert(key.as_str()) {
                return Err(CacheError::InvalidArgument(format!(
                    "Values must be a mapping, key '{}' appears more than once",
                    key
                )));
            }
            cache_keys.push(self.cache_key(key)?);
        }

        pairs
            .into_iter()
            .zip(cache_keys)
            .map(|((key, value), cache_key)| -> Result<PackedEntry> {
                Ok((key, cache_key, self.pack(&value)?))
            })
            .collect()
    }
}
