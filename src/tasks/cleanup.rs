//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// Each tick the task takes the store lock, removes every expired entry and
/// releases the lock before sleeping again. The task stops when a value
/// arrives on `shutdown` or its sender is dropped; a sweep that is already
/// running finishes before the task exits, and no new sweep starts after.
///
/// # Arguments
/// * `store` - Shared reference to the cache store
/// * `interval` - Time between sweeps (must be non-zero; the engine skips
///   spawning when sweeping is disabled)
/// * `shutdown` - Receiver half of the engine's stop signal
///
/// # Returns
/// A JoinHandle for the spawned task.
pub fn spawn_reaper(
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.changed() => {
                    info!("TTL sweep task stopping");
                    break;
                }
            }

            // The lock is synchronous; nothing awaits while it is held
            let removed = {
                let mut store = store.lock();
                store.sweep_expired()
            };

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
