//! Response DTOs for the media API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, ReclaimReport};
use crate::media::MediaDescriptor;

/// Response body for POST /resolve and GET /media/:key
#[derive(Debug, Clone, Serialize)]
pub struct DescriptorResponse {
    /// Key the descriptor is cached under
    pub key: String,
    /// True when served from the cache without resolving
    pub cached: bool,
    pub descriptor: MediaDescriptor,
}

impl DescriptorResponse {
    pub fn new(descriptor: &MediaDescriptor, cached: bool) -> Self {
        Self {
            key: descriptor.cache_key().to_string(),
            cached,
            descriptor: descriptor.clone(),
        }
    }
}

/// Response body for the DELETE endpoints
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl DeleteResponse {
    pub fn new(what: impl AsRef<str>, removed: usize) -> Self {
        Self {
            message: format!("Removed {} entries for {}", removed, what.as_ref()),
            removed,
        }
    }
}

/// Response body for POST /reclaim
#[derive(Debug, Clone, Serialize)]
pub struct ReclaimResponse {
    pub expired: usize,
    pub evicted: usize,
    /// Entries left after the pass
    pub remaining: usize,
}

impl ReclaimResponse {
    pub fn new(report: ReclaimReport, remaining: usize) -> Self {
        Self {
            expired: report.expired,
            evicted: report.evicted,
            remaining,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, capacity: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            capacity,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
