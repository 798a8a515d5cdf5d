//! Media Cache - media reference resolution with an expiring descriptor cache
//!
//! Classifies raw media URLs, enriches provider videos with remote metadata
//! under a bounded retry policy, and memoizes the resulting descriptors in a
//! shared cache with TTL expiration and LRU reclamation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod registry;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{MediaError, Result};
pub use media::{MediaDescriptor, Resolver};
pub use registry::{global_cache, CacheRegistry, MediaCache};
pub use tasks::spawn_reclaim_task;
