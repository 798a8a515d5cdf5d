//! Reclamation Task
//!
//! Background task that periodically reclaims expired and surplus cache
//! entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that calls [`SharedCache::reclaim`] every
/// `interval_secs` seconds.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be aborted during graceful
/// shutdown.
///
/// # Example
/// ```ignore
/// let cache = SharedCache::<MediaDescriptor>::new(100);
/// let handle = spawn_reclaim_task(cache.clone(), 60);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_reclaim_task<V>(cache: SharedCache<V>, interval_secs: u64) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!("Starting reclaim task with interval of {} seconds", interval.as_secs());

        loop {
            tokio::time::sleep(interval).await;

            let report = cache.reclaim().await;

            if report.total() > 0 {
                info!(
                    expired = report.expired,
                    evicted = report.evicted,
                    "Reclaimed cache entries"
                );
            } else {
                debug!("Reclaim pass found nothing to remove");
            }
        }
    })
}
