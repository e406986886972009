//! Resilience Layer
//!
//! Protects upstream providers and clients from each other:
//! - `domain/` - Rate buckets, cache entries, request fingerprints, table traits
//! - `application/` - Retry executor and the request gate composing everything
//! - `infra/` - In-memory tables and the background sweeper
//!
//! ## Guarantees
//! - Admission is decided before any cache lookup or upstream call
//! - A limiter failure admits the request (fail-open)
//! - Cached values are served only while `now - inserted_at <= ttl`
//! - Fallback values are never cached
//! - All state is process-local and lost on restart

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

pub use application::config::{ResilienceConfig, RetryConfig};
pub use application::gate::{GateOutcome, GateRequest, RequestGate, Served, ServedFrom};
pub use application::retry::RetryPolicy;
pub use domain::fingerprint::Fingerprint;
pub use error::{ResilienceError, ResilienceResult, UpstreamError, UpstreamResult};
pub use infra::memory::{MemoryResponseCache, SlidingWindowRateLimiter};
pub use infra::sweeper::spawn_sweeper;

#[cfg(test)]
mod tests;
