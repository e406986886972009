//! Advisor Crate
//!
//! Market data and AI advice endpoints for the personal-finance app:
//! - `domain/` - Request models, value objects, prompts and fallback formulas
//! - `application/` - One use case per endpoint, run through the request gate
//! - `infra/` - Gemini and Yahoo Finance clients
//! - `presentation/` - HTTP handlers, DTOs and the router
//!
//! Every upstream call goes through `resilience::RequestGate`: the caller is
//! admitted by the rate limiter, served from cache when possible, and the call
//! is retried with backoff before a fallback (or a 502) is returned.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::AdvisorGate;
pub use application::config::{AdvisorConfig, InputLimits};
pub use domain::upstream::{MarketData, TextGenerator};
pub use error::{AdvisorError, AdvisorResult};
pub use infra::gemini::{GeminiClient, GeminiConfig};
pub use infra::yahoo::{YahooChartClient, YahooClientError, YahooConfig};
pub use presentation::handlers::{AdvisorState, X_CACHE};
pub use presentation::router::advisor_router;
