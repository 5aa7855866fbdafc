//! Size-Cap Sweep Task
//!
//! Background task that keeps a persistent cache namespace under its size cap.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{CacheHandle, CacheValue};

/// Spawns a background task that periodically enforces the size cap.
///
/// Each run evicts at most one entry, the oldest enumerated one, and only
/// when the namespace has reached its `max_size`. Sweep failures are logged
/// and the task keeps running.
///
/// # Arguments
/// * `cache` - Shared cache handle
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(create_cache::<Value>(options, host));
/// let sweep_handle = spawn_sweep_task(cache.clone(), 60);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<T: CacheValue>(
    cache: Arc<CacheHandle<T>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    spawn_sweep_task_every(cache, Duration::from_secs(sweep_interval_secs))
}

/// Like [`spawn_sweep_task`], with an arbitrary interval.
pub fn spawn_sweep_task_every<T: CacheValue>(
    cache: Arc<CacheHandle<T>>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting size-cap sweep for '{}' every {:?}",
            cache.namespace(),
            interval
        );

        loop {
            tokio::time::sleep(interval).await;

            match cache.sanitize().await {
                Ok(Some(evicted)) => info!("Size-cap sweep: evicted {}", evicted),
                Ok(None) => debug!("Size-cap sweep: namespace under cap"),
                Err(e) => warn!("Size-cap sweep failed: {}", e),
            }
        }
    })
}
