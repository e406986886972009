//! Request Gate
//!
//! Per-request flow shared by every upstream-backed endpoint:
//!
//! ```text
//! admission ──rejected──▶ Rejected
//!     │
//! cache check ──hit──▶ Hit
//!     │
//! retry(upstream) ──ok──▶ cache set ──▶ Fresh
//!     │
//!  exhausted ──fallback──▶ Fallback (not cached)
//!     │
//!   Failed
//! ```
//!
//! Admission is checked before any other work, so a rejected request never
//! reaches the cache or the upstream.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use platform::client::ClientKey;
use platform::clock::Clock;
use platform::rate_limit::RateLimitDecision;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::retry::RetryPolicy;
use crate::domain::fingerprint::Fingerprint;
use crate::domain::repository::{RateLimitRepository, ResponseCacheRepository};
use crate::error::{ResilienceError, ResilienceResult, UpstreamResult};

/// Supplier of a degraded value used once every attempt has failed
pub type Fallback<'a, V> = Box<dyn FnOnce() -> V + Send + 'a>;

/// One request as seen by the gate
pub struct GateRequest<'a, P: ?Sized, V> {
    client: &'a ClientKey,
    operation: &'a str,
    payload: &'a P,
    ttl: Duration,
    fallback: Option<Fallback<'a, V>>,
}

impl<'a, P: ?Sized, V> GateRequest<'a, P, V> {
    /// `payload` must be the canonical parameters: the fingerprint is derived from it
    pub fn new(client: &'a ClientKey, operation: &'a str, payload: &'a P, ttl: Duration) -> Self {
        Self {
            client,
            operation,
            payload,
            ttl,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: impl FnOnce() -> V + Send + 'a) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn operation(&self) -> &str {
        self.operation
    }
}

/// Where a served value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedFrom {
    Cache,
    Upstream,
    Fallback,
}

impl ServedFrom {
    /// Value of the `X-Cache` response header
    pub fn as_header_value(&self) -> &'static str {
        match self {
            ServedFrom::Cache => "HIT",
            ServedFrom::Upstream => "MISS",
            ServedFrom::Fallback => "FALLBACK",
        }
    }
}

/// A value ready to be returned to the client
#[derive(Debug, Clone, PartialEq)]
pub struct Served<V> {
    pub value: V,
    pub source: ServedFrom,
}

/// Terminal state of one gate run
#[derive(Debug)]
pub enum GateOutcome<V> {
    /// Fresh cached value
    Hit(V),
    /// Upstream succeeded; the value has been cached
    Fresh(V),
    /// Upstream exhausted; fallback value, not cached
    Fallback(V),
    /// Admission denied
    Rejected(RateLimitDecision),
    /// Upstream exhausted without fallback, or internal failure
    Failed(ResilienceError),
}

impl<V> GateOutcome<V> {
    pub fn into_result(self) -> ResilienceResult<Served<V>> {
        match self {
            GateOutcome::Hit(value) => Ok(Served {
                value,
                source: ServedFrom::Cache,
            }),
            GateOutcome::Fresh(value) => Ok(Served {
                value,
                source: ServedFrom::Upstream,
            }),
            GateOutcome::Fallback(value) => Ok(Served {
                value,
                source: ServedFrom::Fallback,
            }),
            GateOutcome::Rejected(decision) => Err(ResilienceError::RateLimited {
                retry_after: decision.retry_after,
            }),
            GateOutcome::Failed(err) => Err(err),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GateOutcome::Hit(_) => "hit",
            GateOutcome::Fresh(_) => "fresh",
            GateOutcome::Fallback(_) => "fallback",
            GateOutcome::Rejected(_) => "rejected",
            GateOutcome::Failed(_) => "failed",
        }
    }
}

/// Composes the rate limiter, the response cache and the retry executor
pub struct RequestGate<L, C, V> {
    limiter: Arc<L>,
    cache: Arc<C>,
    retry: RetryPolicy,
    clock: Arc<dyn Clock>,
    _value: PhantomData<fn() -> V>,
}

impl<L, C, V> RequestGate<L, C, V>
where
    L: RateLimitRepository,
    C: ResponseCacheRepository<V>,
    V: Clone + Send + Sync,
{
    pub fn new(limiter: Arc<L>, cache: Arc<C>, retry: RetryPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            limiter,
            cache,
            retry,
            clock,
            _value: PhantomData,
        }
    }

    pub fn limiter(&self) -> &Arc<L> {
        &self.limiter
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    /// Admission only, for requests answered without an upstream call
    pub fn admit(&self, client: &ClientKey) -> RateLimitDecision {
        match self.limiter.allow(client, self.clock.now()) {
            Ok(decision) => decision,
            Err(err) => {
                warn!(client = %client, error = %err, "Rate limiter failed, admitting request");
                RateLimitDecision::unlimited()
            }
        }
    }

    /// Run `request` through admission, cache, retry and fallback
    pub async fn run<P, F, Fut>(&self, request: GateRequest<'_, P, V>, call: F) -> GateOutcome<V>
    where
        P: Serialize + ?Sized,
        F: FnMut() -> Fut,
        Fut: Future<Output = UpstreamResult<V>>,
    {
        let GateRequest {
            client,
            operation,
            payload,
            ttl,
            fallback,
        } = request;

        let decision = self.admit(client);
        if !decision.allowed {
            info!(client = %client, operation, outcome = "rejected", "Request rate limited");
            return GateOutcome::Rejected(decision);
        }

        let fingerprint = match Fingerprint::derive(operation, payload) {
            Ok(fingerprint) => fingerprint,
            Err(err) => return GateOutcome::Failed(err),
        };

        if let Some(value) = self.cache.get(&fingerprint, ttl, self.clock.now()) {
            debug!(client = %client, operation, outcome = "hit", "Served from cache");
            return GateOutcome::Hit(value);
        }

        match self.retry.execute(call).await {
            Ok(value) => {
                self.cache.set(fingerprint, value.clone(), self.clock.now());
                debug!(client = %client, operation, outcome = "fresh", "Served from upstream");
                GateOutcome::Fresh(value)
            }
            Err(source) => match fallback {
                Some(fallback) => {
                    warn!(
                        client = %client,
                        operation,
                        outcome = "fallback",
                        error = %source,
                        "Upstream exhausted, serving fallback"
                    );
                    GateOutcome::Fallback(fallback())
                }
                None => {
                    warn!(
                        client = %client,
                        operation,
                        outcome = "failed",
                        error = %source,
                        "Upstream exhausted"
                    );
                    GateOutcome::Failed(ResilienceError::Exhausted {
                        attempts: self.retry.max_attempts(),
                        source,
                    })
                }
            },
        }
    }
}
