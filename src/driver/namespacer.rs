//! Key Namespacer Module
//!
//! Maps caller keys into the driver's prefix so several applications can
//! share one store without colliding.

use crate::error::{CacheError, Result};

/// Separator appended to a prefix that does not already end with it.
pub const PREFIX_SEPARATOR: char = ':';

// == Key Namespacer ==
/// Qualifies caller keys with a fixed prefix.
///
/// Empty caller keys are rejected here, before any store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNamespacer {
    prefix: String,
}

impl KeyNamespacer {
    /// Creates a namespacer; `"app"` is normalized to `"app:"`, an empty prefix is kept as-is.
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.is_empty() && !prefix.ends_with(PREFIX_SEPARATOR) {
            prefix.push(PREFIX_SEPARATOR);
        }
        Self { prefix }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    // == Qualify ==
    /// Returns the store key for `key`.
    pub fn qualify(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(CacheError::InvalidArgument(
                "Cache key cannot be empty".to_string(),
            ));
        }
        Ok(format!("{}{}", self.prefix, key))
    }

    /// Qualifies every key, failing on the first invalid one.
    pub fn qualify_all<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<String>> {
        keys.iter().map(|key| self.qualify(key.as_ref())).collect()
    }

    // == Scan Pattern ==
    /// Glob matching every key under this prefix. Glob metacharacters inside
    /// the prefix are escaped so they only match themselves.
    pub fn scan_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.prefix.len() + 2);
        for c in self.prefix.chars() {
            if matches!(c, '*' | '?' | '[' | ']' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('*');
        pattern
    }

    /// Recovers the caller key from a store key under this prefix.
    pub fn strip<'a>(&self, qualified: &'a str) -> Option<&'a str> {
        qualified
            .strip_prefix(self.prefix.as_str())
            .filter(|key| !key.is_empty())
    }
}
