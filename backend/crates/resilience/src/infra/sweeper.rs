//! Background sweeper
//!
//! Lookups only evict what they touch, so keys that are never requested
//! again would stay in memory for the life of the process. The sweeper
//! periodically drops idle rate buckets and cache entries older than the
//! largest TTL in use.

use std::sync::Arc;
use std::time::Duration;

use platform::clock::Clock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::infra::memory::{MemoryResponseCache, SlidingWindowRateLimiter};

/// Spawn the sweeper task. Returns `None` when `interval` is zero.
pub fn spawn_sweeper<V>(
    limiter: Arc<SlidingWindowRateLimiter>,
    cache: Arc<MemoryResponseCache<V>>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    max_ttl: Duration,
) -> Option<JoinHandle<()>>
where
    V: Send + Sync + 'static,
{
    if interval.is_zero() {
        tracing::info!("Cache sweeper disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let now = clock.now();
            let buckets_removed = limiter.purge_idle(now);
            let entries_removed = cache.purge_older_than(max_ttl, now);
            tracing::debug!(
                buckets_removed = buckets_removed,
                entries_removed = entries_removed,
                tracked_clients = limiter.tracked_clients(),
                cache_entries = cache.len(),
                "Sweep completed"
            );
        }
    }))
}
