//! Resilience Error Types
//!
//! Upstream failures observed by the retry executor, and the failures the
//! request gate can surface. Both integrate with the unified
//! `kernel::error::AppError` system.

use std::time::Duration;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Result of one upstream attempt
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Resilience-layer result type alias
pub type ResilienceResult<T> = Result<T, ResilienceError>;

/// Failure of a single call to an upstream provider
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Connection, DNS or TLS failure
    #[error("upstream transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("upstream returned status {status}")]
    Status { status: u16, body: String },

    /// Attempt exceeded its deadline
    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),

    /// Response arrived but could not be understood
    #[error("upstream response could not be decoded: {0}")]
    Decode(String),

    /// Provider cannot be used (e.g. not configured)
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}

/// Failures surfaced by the request gate
#[derive(Debug, Error)]
pub enum ResilienceError {
    /// Admission denied by the rate limiter
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: Option<Duration> },

    /// Every retry attempt failed and no fallback was configured
    #[error("Upstream failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: UpstreamError,
    },

    /// Request payload could not be canonicalized
    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] serde_json::Error),

    /// Rate limit store failure (the gate fails open on these)
    #[error("Rate limit store error: {0}")]
    Store(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResilienceError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResilienceError::RateLimited { .. } => ErrorKind::TooManyRequests,
            ResilienceError::Exhausted { .. } => ErrorKind::BadGateway,
            ResilienceError::Fingerprint(_)
            | ResilienceError::Store(_)
            | ResilienceError::Internal(_) => ErrorKind::InternalServerError,
        }
    }
}

impl From<ResilienceError> for AppError {
    fn from(err: ResilienceError) -> Self {
        match err {
            ResilienceError::RateLimited { retry_after } => {
                let app_err = AppError::too_many_requests("Rate limit exceeded")
                    .with_action("Wait before sending more requests");
                match retry_after {
                    Some(delay) => app_err.with_retry_after(delay),
                    None => app_err,
                }
            }
            ResilienceError::Exhausted { .. } => {
                AppError::bad_gateway("Upstream service is unavailable")
                    .with_action("Please try again later")
                    .with_source(err)
            }
            ResilienceError::Fingerprint(_)
            | ResilienceError::Store(_)
            | ResilienceError::Internal(_) => {
                AppError::internal("Internal server error").with_source(err)
            }
        }
    }
}
