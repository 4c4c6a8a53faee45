//! Prefixed Cache - a namespaced cache driver over pluggable stores and codecs
//!
//! The [`driver::CacheDriver`] contract (get, fetch, set, delete, has, batch
//! variants and prefix-scoped clear) is implemented by [`driver::RedisDriver`]
//! on top of any [`store::StoreClient`], with values encoded by a
//! [`codec::Packer`]. An HTTP gateway exposes the same contract as JSON.

pub mod api;
pub mod codec;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use codec::{AnyPacker, CodecKind, JsonPacker, MsgPackPacker, Packer};
pub use config::Config;
pub use driver::{BatchWriteReport, CacheDriver, KeyNamespacer, RedisDriver, WriteOutcome};
pub use error::{CacheError, Result};
pub use store::{MemoryStore, StoreClient};
pub use tasks::spawn_cleanup_task;
