//! Stored Entry Module
//!
//! A single value held by the in-process store, with its expiry metadata.

// == Stored Entry ==
/// Stored bytes plus creation and expiry timestamps (Unix milliseconds).
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// Stored representation produced by the codec
    pub value: Vec<u8>,
    /// Creation timestamp
    pub created_at: u64,
    /// Expiration timestamp, None = no expiration
    pub expires_at: Option<u64>,
}

impl StoredEntry {
    /// Creates an entry written at `now`, expiring `ttl_secs` later when set.
    pub fn new(value: Vec<u8>, ttl_secs: Option<u64>, now: u64) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: ttl_secs.map(|ttl| now.saturating_add(ttl.saturating_mul(1000))),
        }
    }

    // == Is Expired ==
    /// An entry is expired once `now` reaches its expiration time.
    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|expires| now >= expires)
    }

    /// Remaining lifetime in milliseconds; `Some(0)` once expired, `None` for persistent entries.
    pub fn ttl_remaining_ms(&self, now: u64) -> Option<u64> {
        self.expires_at.map(|expires| expires.saturating_sub(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_without_ttl_never_expires() {
        let entry = StoredEntry::new(b"v".to_vec(), None, 1_000);

        assert_eq!(entry.created_at, 1_000);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(u64::MAX));
        assert!(entry.ttl_remaining_ms(5_000).is_none());
    }

    #[test]
    fn test_entry_expiration_boundary() {
        let entry = StoredEntry::new(b"v".to_vec(), Some(5), 1_000);

        assert_eq!(entry.expires_at, Some(6_000));
        assert!(!entry.is_expired(5_999));
        assert!(entry.is_expired(6_000));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = StoredEntry::new(b"v".to_vec(), Some(10), 0);

        assert_eq!(entry.ttl_remaining_ms(4_000), Some(6_000));
        assert_eq!(entry.ttl_remaining_ms(20_000), Some(0));
    }
}
