//! Infrastructure Layer
//!
//! In-memory implementations of the repository traits and their
//! maintenance task.

pub mod memory;
pub mod sweeper;
