//! Remote Store Driver Module
//!
//! Implements the cache contract against an injected [`StoreClient`],
//! namespacing keys and encoding values at the boundary.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{
    expiry_seconds, BaseDriver, BatchWriteReport, CacheDriver, KeyNamespacer, WriteOutcome,
    DEFAULT_SCAN_COUNT,
};
use crate::codec::{JsonPacker, Packer};
use crate::error::{CacheError, Result};
use crate::store::StoreClient;

// == Redis Driver ==
/// Cache driver over a Redis-compatible store.
///
/// Holds no mutable state: one instance can serve any number of concurrent
/// callers, with ordering left to the store (last write wins).
#[derive(Clone)]
pub struct RedisDriver<P = JsonPacker> {
    base: BaseDriver<P>,
    store: Arc<dyn StoreClient>,
    scan_count: usize,
}

impl<P: Packer> RedisDriver<P> {
    // == Constructor ==
    /// Creates a driver.
    ///
    /// # Arguments
    /// * `store` - Connected store handle, shared with its owner
    /// * `packer` - Value codec
    /// * `prefix` - Key namespace, normalized to end in `:`
    pub fn new(store: Arc<dyn StoreClient>, packer: P, prefix: &str) -> Self {
        Self {
            base: BaseDriver::new(prefix, packer),
            store,
            scan_count: DEFAULT_SCAN_COUNT,
        }
    }

    /// Sets the page size `clear` requests per scan (minimum 1).
    pub fn with_scan_count(mut self, scan_count: usize) -> Self {
        self.scan_count = scan_count.max(1);
        self
    }

    pub fn keys(&self) -> &KeyNamespacer {
        self.base.keys()
    }

    pub fn packer(&self) -> &P {
        self.base.packer()
    }

    pub fn store(&self) -> &Arc<dyn StoreClient> {
        &self.store
    }

    pub fn scan_count(&self) -> usize {
        self.scan_count
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let cache_key = self.base.cache_key(key)?;
        let found = self.store.get(&cache_key).await?;
        debug!(key = %cache_key, hit = found.is_some(), "Cache GET");

        found.map(|bytes| self.base.unpack(&bytes)).transpose()
    }
}

impl<P> std::fmt::Debug for RedisDriver<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisDriver")
            .field("prefix", &self.base.keys().prefix())
            .field("store", &self.store.name())
            .field("scan_count", &self.scan_count)
            .finish()
    }
}

#[async_trait]
impl<P: Packer> CacheDriver for RedisDriver<P> {
    async fn get<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        Ok(self.lookup(key).await?.unwrap_or(default))
    }

    async fn fetch<T>(&self, key: &str, default: T) -> Result<(bool, T)>
    where
        T: DeserializeOwned + Send,
    {
        Ok(match self.lookup(key).await? {
            Some(value) => (true, value),
            None => (false, default),
        })
    }

    async fn set<T>(&self, key: &str, value: &T, ttl: Option<i64>) -> Result<bool>
    where
        T: Serialize + Sync + ?Sized,
    {
        let cache_key = self.base.cache_key(key)?;
        let bytes = self.base.pack(value)?;
        let ttl_secs = expiry_seconds(ttl);

        let stored = self.store.set(&cache_key, &bytes, ttl_secs).await?;
        debug!(key = %cache_key, ttl_secs = ?ttl_secs, stored, "Cache SET");
        Ok(stored)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let cache_key = self.base.cache_key(key)?;
        let removed = self.store.delete(std::slice::from_ref(&cache_key)).await?;
        debug!(key = %cache_key, removed, "Cache DEL");
        Ok(true)
    }

    async fn clear(&self) -> Result<bool> {
        let pattern = self.base.keys().scan_pattern();
        let mut cursor = 0;
        let mut removed = 0;
        let mut pages = 0;

        loop {
            let (next, keys) = self.store.scan(cursor, &pattern, self.scan_count).await?;
            pages += 1;
            if !keys.is_empty() {
                let deleted = self.store.delete(&keys).await?;
                debug!(
                    first = ?keys.first().and_then(|key| self.base.keys().strip(key)),
                    scanned = keys.len(),
                    deleted,
                    "Cache DEL scan page"
                );
                removed += deleted;
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }

        info!(
            prefix = self.base.keys().prefix(),
            removed, pages, "Cleared cache namespace"
        );
        Ok(true)
    }

    async fn get_multiple<K, T>(&self, keys: &[K], default: T) -> Result<HashMap<String, T>>
    where
        K: AsRef<str> + Sync,
        T: DeserializeOwned + Clone + Send,
    {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let cache_keys = self.base.keys().qualify_all(keys)?;
        let values = self.store.mget(&cache_keys).await?;
        if values.len() != keys.len() {
            return Err(CacheError::Store(format!(
                "MGET returned {} values for {} keys",
                values.len(),
                keys.len()
            )));
        }

        let mut result = HashMap::with_capacity(keys.len());
        let mut hits = 0;
        for (key, value) in keys.iter().zip(values) {
            let value = match value {
                Some(bytes) => {
                    hits += 1;
                    self.base.unpack(&bytes)?
                }
                None => default.clone(),
            };
            result.insert(key.as_ref().to_string(), value);
        }

        debug!(requested = keys.len(), hits, "Cache MGET");
        Ok(result)
    }

    async fn set_multiple<I, K, V>(&self, values: I, ttl: Option<i64>) -> Result<BatchWriteReport>
    where
        I: IntoIterator<Item = (K, V)> + Send,
        K: Into<String>,
        V: Serialize,
    {
        let entries = self.base.pack_mapping(values)?;
        if entries.is_empty() {
            return Ok(BatchWriteReport::default());
        }

        let Some(ttl_secs) = expiry_seconds(ttl) else {
            let (keys, pairs): (Vec<String>, Vec<(String, Vec<u8>)>) = entries
                .into_iter()
                .map(|(key, cache_key, bytes)| (key, (cache_key, bytes)))
                .unzip();

            let stored = self.store.mset(&pairs).await?;
            debug!(count = pairs.len(), stored, "Cache MSET");
            let outcome = if stored {
                WriteOutcome::Stored
            } else {
                WriteOutcome::Rejected
            };
            return Ok(BatchWriteReport::uniform(keys, outcome));
        };

        // No multi-write carries a per-key TTL, so each key is its own round trip
        let mut report = BatchWriteReport::with_capacity(entries.len());
        for (key, cache_key, bytes) in entries {
            let outcome = match self.store.set(&cache_key, &bytes, Some(ttl_secs)).await {
                Ok(true) => WriteOutcome::Stored,
                Ok(false) => WriteOutcome::Rejected,
                Err(err) => WriteOutcome::Failed(err.to_string()),
            };
            report.push(key, outcome);
        }

        if report.is_success() {
            debug!(count = report.len(), ttl_secs, "Cache SET batch");
        } else {
            warn!(
                failed = report.failures().count(),
                total = report.len(),
                ttl_secs,
                "Batch write with TTL partially failed"
            );
        }
        Ok(report)
    }

    async fn delete_multiple<K>(&self, keys: &[K]) -> Result<bool>
    where
        K: AsRef<str> + Sync,
    {
        if keys.is_empty() {
            return Ok(true);
        }

        let cache_keys = self.base.keys().qualify_all(keys)?;
        let removed = self.store.delete(&cache_keys).await?;
        debug!(requested = cache_keys.len(), removed, "Cache DEL batch");
        Ok(true)
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let cache_key = self.base.cache_key(key)?;
        Ok(self.store.exists(&cache_key).await? > 0)
    }
}
