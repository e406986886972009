//! Application Layer
//!
//! Orchestrates the tables and the retry executor into the per-request flow.

pub mod config;
pub mod gate;
pub mod retry;
