//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client identification (forwarded address headers, connection address)
//! - Clock abstraction for time-dependent policies
//! - Environment-backed configuration helpers
//! - Hashing utilities (SHA-256, hex)
//! - Rate limiting configuration and decisions

pub mod client;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod rate_limit;
