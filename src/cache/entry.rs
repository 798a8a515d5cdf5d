//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with expiration support.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// Represents a single cache entry with its shared value and metadata.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The key this entry is stored under
    pub key: String,
    /// The stored value, shared read-only with callers
    pub value: Arc<V>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Expiration timestamp, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
    /// Last time the entry was stored or read
    pub last_accessed: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring at `expires_at` (never, if None).
    pub fn new(key: String, value: Arc<V>, expires_at: Option<DateTime<Utc>>) -> Self {
        let now = Utc::now();
        Self {
            key,
            value,
            created_at: now,
            expires_at,
            last_accessed: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired relative to `now`.
    ///
    /// An entry is expired once `now >= expires_at`, so an entry stored with
    /// an expiration of "now" is already absent on the next read.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks if the entry has expired against the current clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    // == Touch ==
    /// Refreshes the last access time.
    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::zero())` if the entry has expired
    /// - `Some(remaining)` if the entry has not expired yet
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at.map(|expires| {
            let remaining = expires - Utc::now();
            if remaining > Duration::zero() {
                remaining
            } else {
                Duration::zero()
            }
        })
    }
}

// == Expiry Helpers ==
/// Converts a TTL into an absolute expiration timestamp.
///
/// TTLs too large to represent saturate to "never expires".
pub fn expiry_after(ttl: std::time::Duration) -> Option<DateTime<Utc>> {
    Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
}
