//! Cache Store Module
//!
//! Keyed storage with per-entry expiration and explicit LRU reclamation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::entry::expiry_after;
use crate::cache::{AccessOrder, CacheEntry, CacheStats};

// == Reclaim Report ==
/// Outcome of a reclamation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReclaimReport {
    /// Entries removed because they had expired
    pub expired: usize,
    /// Entries removed to bring the store back within capacity
    pub evicted: usize,
}

impl ReclaimReport {
    pub fn total(&self) -> usize {
        self.expired + self.evicted
    }
}

// == Cache Store ==
/// Cache storage with lazy expiration and LRU reclamation.
///
/// `capacity` is the size the store is brought back to by [`reclaim`],
/// not a bound checked on insert: stores always succeed and may leave the
/// store above capacity until the next reclamation pass.
///
/// [`reclaim`]: CacheStore::reclaim
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency tracker
    order: AccessOrder,
    /// Lookup and reclamation counters
    stats: CacheStats,
    /// Target number of entries after reclamation
    capacity: usize,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store reclaimed down to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: AccessOrder::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Store ==
    /// Inserts or replaces the entry for `key`.
    ///
    /// Replacing an entry resets both its expiration and its last access.
    pub fn store(
        &mut self,
        key: impl Into<String>,
        value: Arc<V>,
        expires_at: Option<DateTime<Utc>>,
    ) {
        let key = key.into();
        self.order.touch(&key);
        self.entries
            .insert(key.clone(), CacheEntry::new(key, value, expires_at));
        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores `value` expiring `ttl` from now.
    pub fn store_for(&mut self, key: impl Into<String>, value: Arc<V>, ttl: std::time::Duration) {
        self.store(key, value, expiry_after(ttl));
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// An expired entry reads as absent and is dropped on the spot.
    pub fn get(&mut self, key: &str) -> Option<Arc<V>> {
        let now = Utc::now();
        let expired = match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                entry.touch();
                let value = Arc::clone(&entry.value);
                self.order.touch(key);
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        self.stats.record_miss();
        None
    }

    // == Contains ==
    /// Checks whether a live entry exists without refreshing its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Remove ==
    /// Removes the entry for `key`, returning whether one was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Remove With Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    pub fn remove_all_with_prefix(&mut self, prefix: &str) -> usize {
        let keys: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();

        for key in &keys {
            self.entries.remove(key);
            self.order.remove(key);
        }

        self.stats.set_total_entries(self.entries.len());
        keys.len()
    }

    // == Remove All ==
    /// Empties the store and returns how many entries it held.
    pub fn remove_all(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
        removed
    }

    // == Count ==
    /// Number of physically present entries, including expired entries
    /// that have not been swept yet.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Reclaim ==
    /// Frees memory in two passes.
    ///
    /// 1. Drops every expired entry.
    /// 2. While the store is above capacity, evicts the least recently
    ///    accessed entry.
    pub fn reclaim(&mut self) -> ReclaimReport {
        let now = Utc::now();
        let expired_keys: Vec<String> = self
            .entries
            .values()
            .filter(|entry| entry.is_expired_at(now))
            .map(|entry| entry.key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.order.remove(key);
        }

        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            match self.order.pop_oldest() {
                Some(key) => {
                    if self.entries.remove(&key).is_some() {
                        evicted += 1;
                    }
                }
                None => break,
            }
        }

        self.stats.record_expirations(expired_keys.len());
        self.stats.record_evictions(evicted);
        self.stats.set_total_entries(self.entries.len());

        ReclaimReport {
            expired: expired_keys.len(),
            evicted,
        }
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the key that the next LRU eviction would remove.
    pub fn eviction_candidate(&self) -> Option<&str> {
        self.order.peek_oldest()
    }
}
