//! Domain Layer - Resilience vocabulary
//!
//! This layer contains:
//! - Entities owned by the shared tables (RateBucket, CacheEntry)
//! - The request fingerprint value object
//! - Repository traits for the rate limit and cache tables

pub mod entities;
pub mod fingerprint;
pub mod repository;
