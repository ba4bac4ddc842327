//! HTTP handlers for the Coffee Farm Analytics Platform

mod analytics;
mod health;

pub use analytics::*;
pub use health::*;
