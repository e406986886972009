//! Advisor Error Types
//!
//! Input validation failures plus everything the request gate can surface.
//! Integrates with the unified `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use resilience::error::ResilienceError;
use thiserror::Error;

/// Advisor result type alias
pub type AdvisorResult<T> = Result<T, AdvisorError>;

#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Malformed or out-of-range request input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Request exceeds a size or count cap
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Rate limiting, upstream exhaustion or internal gate failure
    #[error(transparent)]
    Gate(#[from] ResilienceError),
}

impl AdvisorError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AdvisorError::InvalidInput(message.into())
    }

    pub fn too_large(message: impl Into<String>) -> Self {
        AdvisorError::PayloadTooLarge(message.into())
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdvisorError::InvalidInput(_) => ErrorKind::BadRequest,
            AdvisorError::PayloadTooLarge(_) => ErrorKind::PayloadTooLarge,
            AdvisorError::Gate(err) => err.kind(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AdvisorError::Gate(ResilienceError::RateLimited { .. }) => {
                tracing::warn!("Advisor rate limit exceeded");
            }
            AdvisorError::Gate(ResilienceError::Exhausted { attempts, source }) => {
                tracing::error!(attempts, error = %source, "Advisor upstream exhausted");
            }
            err if err.kind().is_server_error() => {
                tracing::error!(error = %err, "Advisor internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Advisor client error");
            }
        }
    }
}

impl From<AdvisorError> for AppError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::InvalidInput(message) => AppError::bad_request(message),
            AdvisorError::PayloadTooLarge(message) => AppError::payload_too_large(message)
                .with_action("Send fewer items or a smaller request body"),
            AdvisorError::Gate(err) => err.into(),
        }
    }
}

impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<JsonRejection> for AdvisorError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AdvisorError::too_large("Request body is too large")
        } else {
            AdvisorError::InvalidInput(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for AdvisorError {
    fn from(rejection: QueryRejection) -> Self {
        AdvisorError::InvalidInput(rejection.body_text())
    }
}
