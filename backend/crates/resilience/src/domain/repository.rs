//! Repository Traits
//!
//! Interfaces for the two shared tables. Both are in-memory, non-blocking
//! operations, so the traits are synchronous. Implementations are in the
//! infrastructure layer.

use std::time::{Duration, Instant};

use platform::client::ClientKey;
use platform::rate_limit::RateLimitDecision;

use crate::domain::fingerprint::Fingerprint;
use crate::error::ResilienceResult;

/// Per-client admission table
pub trait RateLimitRepository: Send + Sync {
    /// Check the window for `key` at `now`, recording the request if admitted
    fn allow(&self, key: &ClientKey, now: Instant) -> ResilienceResult<RateLimitDecision>;
}

/// TTL response table keyed by request fingerprint
pub trait ResponseCacheRepository<V>: Send + Sync {
    /// Value stored under `key` if it is at most `ttl` old; stale entries are removed
    fn get(&self, key: &Fingerprint, ttl: Duration, now: Instant) -> Option<V>;

    /// Store `value` under `key`, replacing any previous entry
    fn set(&self, key: Fingerprint, value: V, now: Instant);
}
