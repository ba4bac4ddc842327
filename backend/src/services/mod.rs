//! Business logic services for the Coffee Farm Analytics Platform

pub mod analytics;

pub use analytics::AnalyticsService;
