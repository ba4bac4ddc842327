//! Configuration management for the Coffee Farm Analytics Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CFA_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::AnalyticsRules;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Thresholds for recommendations and the dashboard
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Total yield (kg) under which a farmer counts as underperforming
    pub low_yield_kg: Decimal,

    /// Underperformer count that must be exceeded before raising an Action
    pub min_underperformers: usize,

    /// Commercial-grade share (0-1) that triggers a Warning
    pub commercial_ratio_warning: Decimal,

    /// Number of farmers in the top performers table
    pub top_performer_limit: usize,

    /// Months of harvest history that make a farmer active
    pub active_window_months: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CFA_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let rules = AnalyticsRules::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("analytics.low_yield_kg", rules.low_yield_kg.to_string())?
            .set_default("analytics.min_underperformers", rules.min_underperformers as i64)?
            .set_default(
                "analytics.commercial_ratio_warning",
                rules.commercial_ratio_warning.to_string(),
            )?
            .set_default("analytics.top_performer_limit", rules.top_performer_limit as i64)?
            .set_default("analytics.active_window_months", rules.active_window_months as i64)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CFA_ prefix)
            .add_source(
                Environment::with_prefix("CFA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Analytics rules in the form the shared pipeline expects
    pub fn analytics_rules(&self) -> AnalyticsRules {
        self.analytics.clone().into()
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsRules::default().into()
    }
}

impl From<AnalyticsRules> for AnalyticsConfig {
    fn from(rules: AnalyticsRules) -> Self {
        Self {
            low_yield_kg: rules.low_yield_kg,
            min_underperformers: rules.min_underperformers,
            commercial_ratio_warning: rules.commercial_ratio_warning,
            top_performer_limit: rules.top_performer_limit,
            active_window_months: rules.active_window_months,
        }
    }
}

impl From<AnalyticsConfig> for AnalyticsRules {
    fn from(config: AnalyticsConfig) -> Self {
        Self {
            low_yield_kg: config.low_yield_kg,
            min_underperformers: config.min_underperformers,
            commercial_ratio_warning: config.commercial_ratio_warning,
            top_performer_limit: config.top_performer_limit,
            active_window_months: config.active_window_months,
        }
    }
}
