//! Configuration Module
//!
//! Handles loading and managing driver and gateway configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::codec::CodecKind;

/// Driver and gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace prepended to every cache key
    pub prefix: String,
    /// Value codec used by the driver
    pub codec: CodecKind,
    /// Redis connection URL; the in-process store is used when unset
    pub redis_url: Option<String>,
    /// Page size requested from the store during `clear`
    pub scan_count: usize,
    /// Capacity of the in-process store (0 = unbounded)
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Expiry sweep interval in seconds for the in-process store
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_PREFIX` - Key namespace (default: `c:`)
    /// - `CACHE_CODEC` - `json` or `msgpack` (default: `json`)
    /// - `REDIS_URL` - Redis URL (default: unset, in-process store)
    /// - `SCAN_COUNT` - Keys per scan page (default: 100)
    /// - `MAX_ENTRIES` - In-process store capacity (default: 0, unbounded)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            prefix: env::var("CACHE_PREFIX").unwrap_or(defaults.prefix),
            codec: parse_var("CACHE_CODEC").unwrap_or(defaults.codec),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            scan_count: parse_var("SCAN_COUNT")
                .filter(|count| *count > 0)
                .unwrap_or(defaults.scan_count),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: "c:".to_string(),
            codec: CodecKind::Json,
            redis_url: None,
            scan_count: 100,
            max_entries: 0,
            server_port: 3000,
            cleanup_interval: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.prefix, "c:");
        assert_eq!(config.codec, CodecKind::Json);
        assert!(config.redis_url.is_none());
        assert_eq!(config.scan_count, 100);
        assert_eq!(config.max_entries, 0);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 1);
    }

    // Single test touches the environment so parallel tests never race on it.
    #[test]
    fn test_config_from_env() {
        for name in [
            "CACHE_PREFIX",
            "CACHE_CODEC",
            "REDIS_URL",
            "SCAN_COUNT",
            "MAX_ENTRIES",
            "SERVER_PORT",
            "CLEANUP_INTERVAL",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.prefix, "c:");
        assert_eq!(config.scan_count, 100);
        assert!(config.redis_url.is_none());

        env::set_var("CACHE_PREFIX", "app");
        env::set_var("CACHE_CODEC", "msgpack");
        env::set_var("SCAN_COUNT", "0");
        env::set_var("SERVER_PORT", "not-a-port");
        env::set_var("REDIS_URL", "  ");

        let config = Config::from_env();
        assert_eq!(config.prefix, "app");
        assert_eq!(config.codec, CodecKind::MsgPack);
        assert_eq!(config.scan_count, 100);
        assert_eq!(config.server_port, 3000);
        assert!(config.redis_url.is_none());

        for name in ["CACHE_PREFIX", "CACHE_CODEC", "SCAN_COUNT", "SERVER_PORT", "REDIS_URL"] {
            env::remove_var(name);
        }
    }
}
