//! Infrastructure Layer
//!
//! reqwest clients for the upstream providers.

use std::time::Duration;

use resilience::error::UpstreamError;

pub mod gemini;
pub mod yahoo;

/// Longest response body excerpt kept in a status error
const BODY_EXCERPT_CHARS: usize = 512;

/// Map a reqwest failure, stripping the URL (it may carry an API key)
pub(crate) fn request_error(err: reqwest::Error, timeout: Duration) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout(timeout)
    } else if err.is_decode() {
        UpstreamError::Decode(err.without_url().to_string())
    } else {
        UpstreamError::Transport(err.without_url().to_string())
    }
}

/// Turn a non-success response into `UpstreamError::Status`
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(UpstreamError::Status {
        status: status.as_u16(),
        body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
    })
}
