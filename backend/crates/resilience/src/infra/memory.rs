//! In-memory Repository Implementations
//!
//! Process-local tables on `DashMap`. State is lost on restart and is not
//! shared between processes.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use platform::client::ClientKey;
use platform::rate_limit::{RateLimitConfig, RateLimitDecision};

use crate::domain::entities::{CacheEntry, RateBucket};
use crate::domain::fingerprint::Fingerprint;
use crate::domain::repository::{RateLimitRepository, ResponseCacheRepository};
use crate::error::ResilienceResult;

/// Sliding-window limiter keeping recent request timestamps per client
pub struct SlidingWindowRateLimiter {
    config: RateLimitConfig,
    buckets: DashMap<ClientKey, RateBucket>,
}

impl SlidingWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: DashMap::new(),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Number of client keys with a bucket
    pub fn tracked_clients(&self) -> usize {
        self.buckets.len()
    }

    /// Remove buckets with no timestamp left inside the window.
    ///
    /// Returns the number of removed buckets.
    pub fn purge_idle(&self, now: Instant) -> usize {
        let window = self.config.window;
        let before = self.buckets.len();
        self.buckets.retain(|_, bucket| {
            bucket.prune(now, window);
            !bucket.is_empty()
        });
        before.saturating_sub(self.buckets.len())
    }
}

impl RateLimitRepository for SlidingWindowRateLimiter {
    fn allow(&self, key: &ClientKey, now: Instant) -> ResilienceResult<RateLimitDecision> {
        if !self.config.is_enabled() {
            return Ok(RateLimitDecision::unlimited());
        }

        let window = self.config.window;
        let max = self.config.max_requests as usize;

        let mut bucket = self.buckets.entry(key.clone()).or_default();
        bucket.prune(now, window);

        if bucket.len() >= max {
            let retry_after = bucket.time_until_slot(now, window);
            tracing::debug!(
                client = %key,
                count = bucket.len(),
                max = max,
                "Rate limit exceeded"
            );
            return Ok(RateLimitDecision::reject(retry_after));
        }

        bucket.record(now);
        let remaining = max.saturating_sub(bucket.len());
        Ok(RateLimitDecision::allow(remaining as u32))
    }
}

/// TTL cache with lazy expiry on lookup
pub struct MemoryResponseCache<V> {
    entries: DashMap<Fingerprint, CacheEntry<V>>,
}

impl<V> MemoryResponseCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove entries older than `max_age`.
    ///
    /// With `max_age` set to the largest TTL in use, only entries that no
    /// lookup could still return are removed. Returns the number removed.
    pub fn purge_older_than(&self, max_age: Duration, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(max_age, now));
        before.saturating_sub(self.entries.len())
    }
}

impl<V> Default for MemoryResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ResponseCacheRepository<V> for MemoryResponseCache<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &Fingerprint, ttl: Duration, now: Instant) -> Option<V> {
        {
            let entry = self.entries.get(key)?;
            if entry.is_fresh(ttl, now) {
                return Some(entry.value.clone());
            }
        }
        // The read guard is released above; removing while holding it would deadlock.
        // A concurrent writer may have refreshed the entry in between, so re-check.
        self.entries
            .remove_if(key, |_, entry| !entry.is_fresh(ttl, now));
        None
    }

    fn set(&self, key: Fingerprint, value: V, now: Instant) {
        self.entries.insert(key, CacheEntry::new(value, now));
    }
}
