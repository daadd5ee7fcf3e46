//! Expiry reaper: background eviction of idle sessions.
//!
//! DESIGN
//! ======
//! A background task ticks on a fixed period and removes every session idle
//! past the TTL. Eviction is silent from the client's point of view: the next
//! request for that ID simply starts a fresh, empty session. Missed ticks are
//! skipped rather than replayed in a burst.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::services::session::SessionStore;

/// Run one sweep and log what was evicted. Returns the number of sessions removed.
pub fn sweep(store: &SessionStore, ttl: Duration) -> usize {
    let evicted = store.reap_expired(ttl);
    for session_id in &evicted {
        info!(%session_id, "session expired");
    }
    debug!(evicted = evicted.len(), remaining = store.len(), "session sweep complete");
    evicted.len()
}

/// Spawn the background reaper task. Returns a handle for shutdown.
pub fn spawn_reaper_task(store: SessionStore, ttl: Duration, period: Duration) -> JoinHandle<()> {
    info!(ttl_secs = ttl.as_secs(), period_secs = period.as_secs(), "session reaper configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; nothing can be stale yet.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sweep(&store, ttl);
        }
    })
}

#[cfg(test)]
#[path = "reaper_test.rs"]
mod tests;
