//! Shared types and analytics for the Coffee Farm Analytics Platform
//!
//! This crate contains the record models and the pure aggregation pipeline
//! shared between the backend, the dashboard (via WASM), and tests.

pub mod analytics;
pub mod models;
pub mod types;
pub mod validation;

pub use analytics::*;
pub use models::*;
pub use types::*;
pub use validation::*;
