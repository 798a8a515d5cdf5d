//! Shared Cache Handle
//!
//! Thread-safe, cloneable access to a single [`CacheStore`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, ReclaimReport};

// == Shared Cache ==
/// Cloneable handle to one cache store.
///
/// Every structural change (store, remove, prefix removal, clear, reclaim)
/// runs under the write lock, so a prefix removal or reclamation pass is
/// never observed half-done. `get` also takes the write lock because a hit
/// refreshes recency.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SharedCache<V> {
    /// Creates a handle around a fresh store with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self::from_store(CacheStore::new(capacity))
    }

    pub fn from_store(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn store(
        &self,
        key: impl Into<String>,
        value: Arc<V>,
        expires_at: Option<DateTime<Utc>>,
    ) {
        self.inner.write().await.store(key, value, expires_at);
    }

    pub async fn store_for(&self, key: impl Into<String>, value: Arc<V>, ttl: std::time::Duration) {
        self.inner.write().await.store_for(key, value, ttl);
    }

    pub async fn get(&self, key: &str) -> Option<Arc<V>> {
        self.inner.write().await.get(key)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.inner.read().await.contains(key)
    }

    pub async fn remove(&self, key: &str) -> bool {
        self.inner.write().await.remove(key)
    }

    pub async fn remove_all_with_prefix(&self, prefix: &str) -> usize {
        let removed = self.inner.write().await.remove_all_with_prefix(prefix);
        debug!(prefix, removed, "Removed cache entries by prefix");
        removed
    }

    /// Empties the cache, returning how many entries were dropped.
    pub async fn remove_all(&self) -> usize {
        let removed = self.inner.write().await.remove_all();
        debug!(removed, "Removed all cache entries");
        removed
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.count()
    }

    pub async fn reclaim(&self) -> ReclaimReport {
        self.inner.write().await.reclaim()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn capacity(&self) -> usize {
        self.inner.read().await.capacity()
    }

    /// Checks whether two handles point at the same store.
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_one_store() {
        let cache = SharedCache::new(10);
        let other = cache.clone();

        cache.store("a", Arc::new(1u32), None).await;

        assert!(other.contains("a").await);
        assert_eq!(other.get("a").await.as_deref(), Some(&1));
        assert!(cache.same_store(&other));
        assert!(!cache.same_store(&SharedCache::new(10)));
    }

    #[tokio::test]
    async fn test_concurrent_writers() {
        let cache = SharedCache::new(1000);

        let mut handles = Vec::new();
        for worker in 0..8u32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50u32 {
                    cache
                        .store(format!("w{}:{}", worker, i), Arc::new(i), None)
                        .await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.count().await, 400);
        assert_eq!(cache.remove_all_with_prefix("w3:").await, 50);
        assert_eq!(cache.count().await, 350);
    }

    #[tokio::test]
    async fn test_reclaim_through_handle() {
        let cache = SharedCache::new(2);

        cache.store("a", Arc::new(1u32), None).await;
        cache.store("b", Arc::new(2u32), None).await;
        cache.store("c", Arc::new(3u32), None).await;

        let report = cache.reclaim().await;

        assert_eq!(report.evicted, 1);
        assert_eq!(cache.count().await, 2);
        assert!(!cache.contains("a").await);
        assert_eq!(cache.capacity().await, 2);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let cache = SharedCache::new(10);

        cache.store_for("a", Arc::new(1u32), std::time::Duration::from_secs(60)).await;
        cache.store("b", Arc::new(2u32), None).await;

        assert!(cache.remove("a").await);
        assert!(!cache.remove("a").await);
        assert_eq!(cache.remove_all().await, 1);

        assert_eq!(cache.count().await, 0);
        assert_eq!(cache.stats().await.total_entries, 0);
    }
}
