//! Configuration Module
//!
//! Handles loading resolver, cache and server settings from environment
//! variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::media::RetryPolicy;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of descriptors the cache is reclaimed down to
    pub max_entries: usize,
    /// Lifetime of a cached descriptor, in seconds
    pub descriptor_ttl: u64,
    /// Fetch attempts per resolution
    pub max_attempts: u32,
    /// Pause between fetch attempts, in milliseconds
    pub retry_backoff_ms: u64,
    /// Timeout of a single metadata request, in seconds
    pub fetch_timeout: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background reclamation interval in seconds
    pub reclaim_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Cache capacity (default: 100)
    /// - `DESCRIPTOR_TTL` - Descriptor lifetime in seconds (default: 14400)
    /// - `MAX_ATTEMPTS` - Fetch attempts per resolution (default: 3)
    /// - `RETRY_BACKOFF_MS` - Pause between attempts (default: 250)
    /// - `FETCH_TIMEOUT` - Metadata request timeout in seconds (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `RECLAIM_INTERVAL` - Reclamation frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            descriptor_ttl: env_or("DESCRIPTOR_TTL", defaults.descriptor_ttl),
            max_attempts: env_or("MAX_ATTEMPTS", defaults.max_attempts),
            retry_backoff_ms: env_or("RETRY_BACKOFF_MS", defaults.retry_backoff_ms),
            fetch_timeout: env_or("FETCH_TIMEOUT", defaults.fetch_timeout),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            reclaim_interval: env_or("RECLAIM_INTERVAL", defaults.reclaim_interval),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            retry: self.max_attempts > 1,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    pub fn descriptor_ttl(&self) -> Duration {
        Duration::from_secs(self.descriptor_ttl)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 100,
            descriptor_ttl: 4 * 60 * 60,
            max_attempts: 3,
            retry_backoff_ms: 250,
            fetch_timeout: 10,
            server_port: 3000,
            reclaim_interval: 60,
        }
    }
}
