//! Memory Store Module
//!
//! In-process store with Redis command semantics: lazy TTL expiry, glob
//! `scan` with server-side cursors, and optional LRU capacity eviction.

mod clock;
mod entry;
mod lru;
mod pattern;
mod stats;

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::StoreClient;
use crate::error::{CacheError, Result};

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::StoredEntry;
pub use lru::LruTracker;
pub use pattern::glob_match;
pub use stats::StoreStats;

/// Scans left unfinished are forgotten oldest-first beyond this many.
/// Resuming a forgotten cursor fails with `CacheError::Store`.
pub const MAX_OPEN_CURSORS: usize = 1024;

// == Memory Store ==
/// Thread-safe in-process store. Clones share the same data.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
    clock: Arc<dyn Clock>,
}

#[derive(Debug)]
struct Inner {
    /// Ordered so scans walk keys lexically
    entries: BTreeMap<String, StoredEntry>,
    lru: LruTracker,
    stats: StoreStats,
    /// 0 = unbounded
    max_entries: usize,
    /// Open scan cursors -> last key examined
    cursors: BTreeMap<u64, String>,
    next_cursor: u64,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a store on the system clock.
    ///
    /// # Arguments
    /// * `max_entries` - Capacity before LRU eviction, 0 for unbounded
    pub fn new(max_entries: usize) -> Self {
        Self::with_clock(max_entries, Arc::new(SystemClock))
    }

    /// Creates a store reading time from `clock`.
    pub fn with_clock(max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: BTreeMap::new(),
                lru: LruTracker::new(),
                stats: StoreStats::new(),
                max_entries,
                cursors: BTreeMap::new(),
                next_cursor: 1,
            })),
            clock,
        }
    }

    // == Stats ==
    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.entries.len();
        stats
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut inner = self.inner.write().await;

        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.entries.remove(key);
            inner.lru.remove(key);
        }
        inner.stats.record_expirations(expired.len());
        expired.len()
    }

    /// Remaining lifetime of a live key in milliseconds; `None` when absent or persistent.
    pub async fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        let now = self.clock.now_ms();
        let inner = self.inner.read().await;
        inner
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.ttl_remaining_ms(now))
    }

    /// Number of held entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Inner {
    /// Drops `key` if its TTL elapsed; returns whether a live entry remains.
    fn check_live(&mut self, key: &str, now: u64) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                self.entries.remove(key);
                self.lru.remove(key);
                self.stats.record_expirations(1);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    fn read(&mut self, key: &str, now: u64) -> Option<Vec<u8>> {
        if !self.check_live(key, now) {
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn write(&mut self, key: &str, value: Vec<u8>, ttl_secs: Option<u64>, now: u64) {
        let is_new = !self.entries.contains_key(key);
        if is_new && self.max_entries > 0 && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(key = %evicted, "Evicted least recently used entry");
            }
        }

        self.entries
            .insert(key.to_string(), StoredEntry::new(value, ttl_secs, now));
        self.lru.touch(key);
    }

    fn remove(&mut self, key: &str, now: u64) -> bool {
        let live = self.check_live(key, now);
        if live {
            self.entries.remove(key);
            self.lru.remove(key);
        }
        live
    }

    fn open_cursor(&mut self, last_key: String) -> u64 {
        if self.cursors.len() >= MAX_OPEN_CURSORS {
            self.cursors.pop_first();
        }

        let id = self.next_cursor;
        self.next_cursor = self.next_cursor.checked_add(1).unwrap_or(1);
        self.cursors.insert(id, last_key);
        id
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = self.clock.now_ms();
        Ok(self.inner.write().await.read(key, now))
    }

    async fn set(&self, key: &str, value: &[u8], ttl_secs: Option<u64>) -> Result<bool> {
        let now = self.clock.now_ms();
        self.inner
            .write()
            .await
            .write(key, value.to_vec(), ttl_secs, now);
        Ok(true)
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        let now = self.clock.now_ms();
        let mut inner = self.inner.write().await;
        let removed = keys.iter().filter(|key| inner.remove(key, now)).count();
        Ok(removed as u64)
    }

    async fn exists(&self, key: &str) -> Result<u64> {
        let now = self.clock.now_ms();
        let live = self.inner.write().await.check_live(key, now);
        Ok(u64::from(live))
    }

    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>> {
        let now = self.clock.now_ms();
        let mut inner = self.inner.write().await;
        Ok(keys.iter().map(|key| inner.read(key, now)).collect())
    }

    async fn mset(&self, entries: &[(String, Vec<u8>)]) -> Result<bool> {
        let now = self.clock.now_ms();
        let mut inner = self.inner.write().await;
        for (key, value) in entries {
            inner.write(key, value.clone(), None, now);
        }
        Ok(true)
    }

    /// Unlike Redis, cursors are server-side state: a cursor not resumed
    /// before [`MAX_OPEN_CURSORS`] newer scans open is dropped, and resuming
    /// it returns `CacheError::Store`.
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<(u64, Vec<String>)> {
        let now = self.clock.now_ms();
        let count = count.max(1);
        let mut inner = self.inner.write().await;

        let resume_after = if cursor == 0 {
            None
        } else {
            let last = inner.cursors.remove(&cursor).ok_or_else(|| {
                CacheError::Store(format!("Unknown scan cursor {}", cursor))
            })?;
            Some(last)
        };

        let range = match resume_after.as_deref() {
            None => (Bound::Unbounded, Bound::Unbounded),
            Some(last) => (Bound::Excluded(last), Bound::Unbounded),
        };

        let mut page = Vec::new();
        let mut last_examined = None;
        let mut examined = 0;
        let mut exhausted = true;
        for (key, entry) in inner.entries.range::<str, _>(range) {
            if examined == count {
                exhausted = false;
                break;
            }
            examined += 1;
            last_examined = Some(key.clone());

            if !entry.is_expired(now) && glob_match(pattern, key) {
                page.push(key.clone());
            }
        }

        let next = match last_examined {
            Some(last) if !exhausted => inner.open_cursor(last),
            _ => 0,
        };

        debug!(cursor, next, matched = page.len(), "Memory store scan page");
        Ok((next, page))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
