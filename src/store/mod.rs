//! Store Module
//!
//! The key-value store contract the driver talks to, plus its implementations.
//! Keys passed to a store are always fully qualified; stores know nothing
//! about prefixes or codecs.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::{Clock, ManualClock, MemoryStore, StoreStats, SystemClock};
#[cfg(feature = "redis")]
pub use self::redis::RedisStore;

// == Store Client ==
/// Connected handle to a key-value store.
///
/// The driver never constructs or tears down a store; it holds a shared
/// reference and issues one call per round trip. Implementations must be
/// safe for concurrent use.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Reads a key; `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes a key unconditionally. `ttl_secs` makes the entry expire.
    /// Returns the store's acknowledgement.
    async fn set(&self, key: &str, value: &[u8], ttl_secs: Option<u64>) -> Result<bool>;

    /// Deletes keys and returns how many existed.
    async fn delete(&self, keys: &[String]) -> Result<u64>;

    /// Returns how many of the given key exist (0 or 1).
    async fn exists(&self, key: &str) -> Result<u64>;

    /// Reads many keys in one round trip, positionally aligned with `keys`.
    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>>;

    /// Writes many non-expiring keys in one round trip.
    async fn mset(&self, entries: &[(String, Vec<u8>)]) -> Result<bool>;

    /// Returns one page of keys matching a glob `pattern`.
    ///
    /// Cursor `0` starts an iteration; a returned cursor of `0` ends it.
    /// Pages may be empty while the cursor is still non-zero.
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<(u64, Vec<String>)>;

    /// Short backend name used in logs and health output.
    fn name(&self) -> &'static str;
}
