//! Domain Entities
//!
//! Values stored in the process-wide rate limit and cache tables.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Request timestamps recorded for one client key
#[derive(Debug, Clone, Default)]
pub struct RateBucket {
    timestamps: VecDeque<Instant>,
}

impl RateBucket {
    /// Drop every timestamp that is at least `window` old at `now`.
    ///
    /// Uses `retain` rather than popping from the front: racing requests can
    /// record slightly out-of-order instants.
    pub fn prune(&mut self, now: Instant, window: Duration) {
        self.timestamps
            .retain(|t| now.saturating_duration_since(*t) < window);
    }

    pub fn record(&mut self, now: Instant) {
        self.timestamps.push_back(now);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Time until the oldest retained timestamp leaves the window
    pub fn time_until_slot(&self, now: Instant, window: Duration) -> Duration {
        self.timestamps
            .iter()
            .min()
            .map(|oldest| window.saturating_sub(now.saturating_duration_since(*oldest)))
            .unwrap_or(Duration::ZERO)
    }
}

/// A cached value and the instant it was written
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub inserted_at: Instant,
    pub value: V,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, inserted_at: Instant) -> Self {
        Self { inserted_at, value }
    }

    /// Valid while `now - inserted_at <= ttl`
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) <= ttl
    }
}
