//! Cache Registry
//!
//! Hands out the one descriptor cache shared by every resolver.

use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::cache::SharedCache;
use crate::media::MediaDescriptor;

/// Shared cache of resolved descriptors.
pub type MediaCache = SharedCache<MediaDescriptor>;

/// Capacity of the process-wide cache unless [`CacheRegistry::init_global`]
/// chose another one first.
pub const DEFAULT_CAPACITY: usize = 100;

static GLOBAL: OnceLock<CacheRegistry> = OnceLock::new();

// == Cache Registry ==
/// Lazily creates and hands out one shared [`MediaCache`].
///
/// Tests build their own registry (or their own `SharedCache`) instead of
/// going through [`CacheRegistry::global`].
#[derive(Debug)]
pub struct CacheRegistry {
    capacity: usize,
    slot: Mutex<Option<MediaCache>>,
}

impl CacheRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slot: Mutex::new(None),
        }
    }

    /// The process-wide registry, created with [`DEFAULT_CAPACITY`] if
    /// nothing initialized it yet.
    pub fn global() -> &'static CacheRegistry {
        Self::init_global(DEFAULT_CAPACITY)
    }

    /// Creates the process-wide registry with `capacity`.
    ///
    /// The first call wins; later calls return the existing registry
    /// unchanged. The server calls this at startup so embedders reaching
    /// for [`global_cache`] share its cache.
    pub fn init_global(capacity: usize) -> &'static CacheRegistry {
        let registry = GLOBAL.get_or_init(|| CacheRegistry::new(capacity));
        if registry.capacity != capacity {
            warn!(
                requested = capacity,
                capacity = registry.capacity,
                "Global cache registry already initialized"
            );
        }
        registry
    }

    /// Returns the shared cache, creating it on first use.
    pub fn global_cache(&self) -> MediaCache {
        self.slot
            .lock()
            .get_or_insert_with(|| {
                info!(capacity = self.capacity, "Creating shared media cache");
                SharedCache::new(self.capacity)
            })
            .clone()
    }

    /// Drops the current cache; the next [`global_cache`] call starts empty.
    ///
    /// Handles obtained earlier keep working against the detached cache.
    ///
    /// [`global_cache`]: CacheRegistry::global_cache
    pub fn reset(&self) {
        self.slot.lock().take();
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.lock().is_some()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Shortcut for `CacheRegistry::global().global_cache()`.
pub fn global_cache() -> MediaCache {
    CacheRegistry::global().global_cache()
}
