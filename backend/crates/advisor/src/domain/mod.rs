//! Domain Layer
//!
//! Finance models, validated value objects, upstream interfaces, prompt
//! construction and the offline fallback formulas.

pub mod fallback;
pub mod models;
pub mod prompts;
pub mod services;
pub mod upstream;
pub mod value_objects;
