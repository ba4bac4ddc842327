//! Decision-support recommendations for cooperative administrators

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AnalyticsRules, FarmerYield};
use crate::types::GradeTotals;

/// Kind of recommendation, in display order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecommendationKind {
    Action,
    Warning,
    Opportunity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
}

impl Recommendation {
    fn new(kind: RecommendationKind, title: &str, description: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description,
        }
    }
}

/// Build recommendations from farmers ranked by total yield (highest first)
/// and the grade totals across all harvests.
///
/// Output order is always Action, Warning, Opportunity; each kind appears at
/// most once.
pub fn generate_recommendations(
    ranked: &[FarmerYield],
    grades: &GradeTotals,
    rules: &AnalyticsRules,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let low_performers = ranked
        .iter()
        .filter(|f| f.total_yield < rules.low_yield_kg)
        .count();
    if low_performers > rules.min_underperformers {
        recommendations.push(Recommendation::new(
            RecommendationKind::Action,
            "Support Underperforming Farmers",
            format!(
                "More than {} farmers have a total yield below {}kg. Consider targeted training or resource allocation for these farmers.",
                low_performers,
                rules.low_yield_kg.normalize()
            ),
        ));
    }

    if let Some(ratio) = grades.commercial_ratio() {
        if ratio > rules.commercial_ratio_warning {
            let percent = (rules.commercial_ratio_warning * Decimal::from(100)).normalize();
            recommendations.push(Recommendation::new(
                RecommendationKind::Warning,
                "High Commercial Grade Ratio",
                format!(
                    "Over {}% of the coffee is commercial grade. Investigate farming practices to improve quality and increase premium yields.",
                    percent
                ),
            ));
        }
    }

    if let Some(top) = ranked.first() {
        recommendations.push(Recommendation::new(
            RecommendationKind::Opportunity,
            "Leverage Top Performers",
            format!(
                "Farmer {} is a top performer. Analyze their methods and share best practices with other farmers.",
                top.display_name
            ),
        ));
    }

    tracing::debug!(count = recommendations.len(), "Generated recommendations");

    recommendations
}
