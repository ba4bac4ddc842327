//! Full admin dashboard report

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    average_farm_elevation, classify_performance, compute_growth_projection,
    compute_yearly_averages, count_active_farmers, generate_recommendations, grade_distribution,
    grade_totals, monthly_raw_harvest, rank_farmers_by_yield, total_raw_harvest, tree_statistics,
    AnalyticsRules, FarmerYield, GradeDistribution, GrowthProjection, PerformanceCategories,
    Recommendation, TreeStatistics, YearlyAverages,
};
use crate::models::AnalyticsSnapshot;
use crate::types::{DateRange, GradeTotals};

/// Everything the admin analytics page shows, computed in one pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardReport {
    pub as_of: NaiveDate,
    /// Window used for `active_farmers`; None when it starts before the supported calendar
    pub active_window: Option<DateRange>,
    pub total_farmers: usize,
    pub active_farmers: usize,
    pub trees: TreeStatistics,
    pub average_farm_elevation_m: Decimal,
    pub total_raw_harvest_kg: Decimal,
    /// Raw harvest per `YYYY-MM` month
    pub monthly_raw_harvest_kg: BTreeMap<String, Decimal>,
    pub grade_totals: GradeTotals,
    pub grade_distribution: GradeDistribution,
    pub top_performers: Vec<FarmerYield>,
    pub yearly: YearlyAverages,
    pub growth: GrowthProjection,
    pub performance: PerformanceCategories,
    pub recommendations: Vec<Recommendation>,
}

/// Build the dashboard report for a snapshot.
///
/// Recommendations are derived from the truncated top performers list, so the
/// underperformer count only considers farmers in that table.
pub fn build_dashboard(
    snapshot: &AnalyticsSnapshot,
    as_of: NaiveDate,
    rules: &AnalyticsRules,
) -> DashboardReport {
    let harvests = &snapshot.harvests;
    let farmers = &snapshot.farmers;

    let grades = grade_totals(harvests);
    let active_window = DateRange::trailing_months(as_of, rules.active_window_months);
    let top_performers = rank_farmers_by_yield(harvests, farmers, rules.top_performer_limit);
    let yearly = compute_yearly_averages(harvests);
    let growth = compute_growth_projection(&yearly);
    let performance = classify_performance(harvests, farmers);
    let recommendations = generate_recommendations(&top_performers, &grades, rules);

    tracing::info!(
        harvests = harvests.len(),
        farmers = farmers.len(),
        plants = snapshot.plants.len(),
        %as_of,
        "Built analytics dashboard"
    );

    DashboardReport {
        as_of,
        active_window,
        total_farmers: farmers.len(),
        active_farmers: active_window
            .map(|window| count_active_farmers(harvests, &window))
            .unwrap_or(0),
        trees: tree_statistics(&snapshot.plants),
        average_farm_elevation_m: average_farm_elevation(farmers),
        total_raw_harvest_kg: total_raw_harvest(harvests),
        monthly_raw_harvest_kg: monthly_raw_harvest(harvests),
        grade_distribution: grade_distribution(&grades),
        grade_totals: grades,
        top_performers,
        yearly,
        growth,
        performance,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FarmerIdentity, HarvestRecord, PlantRecord};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_snapshot() {
        let report = build_dashboard(
            &AnalyticsSnapshot::default(),
            date(2024, 1, 1),
            &AnalyticsRules::default(),
        );
        assert_eq!(report.total_farmers, 0);
        assert_eq!(report.active_farmers, 0);
        assert_eq!(report.total_raw_harvest_kg, Decimal::ZERO);
        assert!(report.monthly_raw_harvest_kg.is_empty());
        assert_eq!(report.grade_distribution, GradeDistribution::default());
        assert!(report.top_performers.is_empty());
        assert!(report.yearly.is_empty());
        assert_eq!(report.growth, GrowthProjection::default());
        assert_eq!(report.performance, PerformanceCategories::default());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_dashboard_composes_figures() {
        let a = FarmerIdentity::new(Uuid::new_v4(), "Kanya", "Inthawong");
        let b = FarmerIdentity::new(Uuid::new_v4(), "Prasit", "Thongdee");
        let snapshot = AnalyticsSnapshot {
            harvests: vec![
                HarvestRecord::new(a.farmer_id, date(2022, 12, 1), Decimal::from(40)),
                HarvestRecord::new(b.farmer_id, date(2022, 12, 5), Decimal::from(60)),
                HarvestRecord::new(a.farmer_id, date(2023, 12, 1), Decimal::from(50)).with_grades(
                    Decimal::from(10),
                    Decimal::from(10),
                    Decimal::from(30),
                ),
                HarvestRecord {
                    raw_quantity_kg: Some(Decimal::from(300)),
                    ..HarvestRecord::new(b.farmer_id, date(2023, 12, 5), Decimal::from(70))
                },
            ],
            farmers: vec![a, b],
            plants: vec![PlantRecord::new(Uuid::new_v4(), 40)],
        };

        let report = build_dashboard(&snapshot, date(2024, 3, 1), &AnalyticsRules::default());
        assert_eq!(report.total_farmers, 2);
        assert_eq!(report.active_farmers, 2);
        assert_eq!(report.active_window.unwrap().start, date(2023, 9, 1));
        assert_eq!(report.trees.total_trees, 40);
        assert_eq!(report.total_raw_harvest_kg, Decimal::from(300));
        assert_eq!(report.monthly_raw_harvest_kg["2023-12"], Decimal::from(300));
        assert_eq!(report.grade_distribution.commercial_pct, Decimal::from(60));
        assert_eq!(report.growth.growth_rate, Decimal::new(2, 1));
        assert_eq!(report.growth.projected_average_yield, Decimal::from(72));
        assert_eq!(report.top_performers[0].display_name, "Prasit Thongdee");
        assert_eq!(
            report.recommendations.iter().map(|r| r.kind).collect::<Vec<_>>(),
            vec![
                crate::analytics::RecommendationKind::Warning,
                crate::analytics::RecommendationKind::Opportunity
            ]
        );
    }
}
