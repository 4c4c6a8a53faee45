//! Driver Module
//!
//! The cache contract exposed to callers and its store-backed implementation.
//! Callers only ever see their own keys; qualification with the driver's
//! prefix happens inside the driver.

mod base;
mod namespacer;
mod redis_driver;
mod report;

#[cfg(test)]
mod property_tests;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

pub use base::{BaseDriver, PackedEntry};
pub use namespacer::{KeyNamespacer, PREFIX_SEPARATOR};
pub use redis_driver::RedisDriver;
pub use report::{BatchWriteReport, KeyWrite, WriteOutcome};

/// Default number of keys requested per scan page by `clear`.
pub const DEFAULT_SCAN_COUNT: usize = 100;

/// Normalizes a caller TTL: zero, negative or absent means no expiration.
pub fn expiry_seconds(ttl: Option<i64>) -> Option<u64> {
    ttl.filter(|secs| *secs > 0).map(|secs| secs as u64)
}

// == Cache Driver ==
/// Uniform cache contract over any store and codec.
///
/// # Errors
/// Every operation propagates store failures unchanged. Reads return
/// [`crate::error::CacheError::Decode`] when a stored value cannot be decoded;
/// a decode failure is never reported as a missing key. Empty keys fail with
/// [`crate::error::CacheError::InvalidArgument`] before the store is called.
#[async_trait]
pub trait CacheDriver: Send + Sync {
    /// Returns the stored value, or `default` when the key is absent.
    async fn get<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: DeserializeOwned + Send;

    /// Like [`CacheDriver::get`], also reporting whether the key was present.
    async fn fetch<T>(&self, key: &str, default: T) -> Result<(bool, T)>
    where
        T: DeserializeOwned + Send;

    /// Stores a value, overwriting any existing entry. A `ttl` above zero
    /// expires the entry after that many seconds; otherwise it persists.
    /// Returns the store's acknowledgement.
    async fn set<T>(&self, key: &str, value: &T, ttl: Option<i64>) -> Result<bool>
    where
        T: Serialize + Sync + ?Sized;

    /// Removes a key. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Removes every key under the driver's prefix by scanning in pages.
    ///
    /// Not a snapshot: keys written while the scan runs may or may not be removed.
    async fn clear(&self) -> Result<bool>;

    /// Reads many keys in one round trip. The result holds exactly one entry
    /// per distinct input key, `default` standing in for absent ones.
    async fn get_multiple<K, T>(&self, keys: &[K], default: T) -> Result<HashMap<String, T>>
    where
        K: AsRef<str> + Sync,
        T: DeserializeOwned + Clone + Send;

    /// Stores a key/value mapping.
    ///
    /// Without a TTL this is a single multi-write whose acknowledgement covers
    /// every key. With a TTL each key is written on its own and the writes are
    /// NOT atomic: some keys may be stored while others fail. Per-key failures
    /// are reported in the returned [`BatchWriteReport`] instead of aborting.
    async fn set_multiple<I, K, V>(&self, values: I, ttl: Option<i64>) -> Result<BatchWriteReport>
    where
        I: IntoIterator<Item = (K, V)> + Send,
        K: Into<String>,
        V: Serialize;

    /// Removes many keys in one round trip.
    async fn delete_multiple<K>(&self, keys: &[K]) -> Result<bool>
    where
        K: AsRef<str> + Sync;

    /// Returns whether the key is present.
    async fn has(&self, key: &str) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_seconds() {
        assert_eq!(expiry_seconds(None), None);
        assert_eq!(expiry_seconds(Some(0)), None);
        assert_eq!(expiry_seconds(Some(-1)), None);
        assert_eq!(expiry_seconds(Some(5)), Some(5));
    }
}
