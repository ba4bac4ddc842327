//! Thresholds used by the recommendation and dashboard rules

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tunable thresholds for the analytics pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyticsRules {
    /// Farmers whose total yield is below this are counted as underperforming
    pub low_yield_kg: Decimal,
    /// An Action is raised only when more farmers than this are underperforming
    pub min_underperformers: usize,
    /// Commercial-grade share above which a Warning is raised (0-1)
    pub commercial_ratio_warning: Decimal,
    /// Size of the top performers table
    pub top_performer_limit: usize,
    /// Months of history that make a farmer "active"
    pub active_window_months: u32,
}

impl Default for AnalyticsRules {
    fn default() -> Self {
        Self {
            low_yield_kg: Decimal::from(50),
            min_underperformers: 2,
            commercial_ratio_warning: Decimal::new(4, 1),
            top_performer_limit: 5,
            active_window_months: 6,
        }
    }
}
