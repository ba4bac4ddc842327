//! Analytics service for the admin dashboard
//! Runs the shared aggregation pipeline over record snapshots posted by the dashboard

use chrono::NaiveDate;
use shared::{
    build_dashboard, classify_performance, compute_growth_projection, compute_yearly_averages,
    generate_recommendations, grade_totals, rank_farmers_by_yield, AnalyticsRules,
    AnalyticsSnapshot, DashboardReport, GrowthProjection, PerformanceCategories, Recommendation,
    YearlyAverages,
};

/// Analytics service
#[derive(Clone)]
pub struct AnalyticsService {
    rules: AnalyticsRules,
}

impl AnalyticsService {
    pub fn new(rules: AnalyticsRules) -> Self {
        Self { rules }
    }

    /// Average yield per farmer for each harvest year
    pub fn yearly_averages(&self, snapshot: &AnalyticsSnapshot) -> YearlyAverages {
        compute_yearly_averages(&snapshot.harvests)
    }

    /// Growth between the two latest years and next year's projection
    pub fn growth_projection(&self, snapshot: &AnalyticsSnapshot) -> GrowthProjection {
        compute_growth_projection(&compute_yearly_averages(&snapshot.harvests))
    }

    /// Performance tiers by average yield
    pub fn performance_categories(&self, snapshot: &AnalyticsSnapshot) -> PerformanceCategories {
        classify_performance(&snapshot.harvests, &snapshot.farmers)
    }

    /// Recommendations based on the top performers table and grade totals
    pub fn recommendations(&self, snapshot: &AnalyticsSnapshot) -> Vec<Recommendation> {
        let ranked = rank_farmers_by_yield(
            &snapshot.harvests,
            &snapshot.farmers,
            self.rules.top_performer_limit,
        );
        let grades = grade_totals(&snapshot.harvests);
        generate_recommendations(&ranked, &grades, &self.rules)
    }

    /// Full dashboard report, optionally overriding the top performers table size
    pub fn dashboard(
        &self,
        snapshot: &AnalyticsSnapshot,
        as_of: NaiveDate,
        top_performer_limit: Option<usize>,
    ) -> DashboardReport {
        let mut rules = self.rules.clone();
        if let Some(limit) = top_performer_limit {
            rules.top_performer_limit = limit;
        }
        build_dashboard(snapshot, as_of, &rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{FarmerIdentity, HarvestRecord, RecommendationKind};
    use uuid::Uuid;

    fn snapshot(farmer_count: usize, dry: i64) -> AnalyticsSnapshot {
        let farmers: Vec<FarmerIdentity> = (0..farmer_count)
            .map(|i| FarmerIdentity::new(Uuid::new_v4(), "Farmer", &i.to_string()))
            .collect();
        let harvests = farmers
            .iter()
            .map(|f| {
                HarvestRecord::new(
                    f.farmer_id,
                    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                    Decimal::from(dry),
                )
            })
            .collect();
        AnalyticsSnapshot {
            harvests,
            farmers,
            plants: vec![],
        }
    }

    #[test]
    fn test_recommendations_use_top_performer_limit() {
        // Five low-yield farmers, but only the top two are ranked
        let service = AnalyticsService::new(AnalyticsRules {
            top_performer_limit: 2,
            ..Default::default()
        });
        let kinds: Vec<_> = service
            .recommendations(&snapshot(5, 10))
            .into_iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(kinds, vec![RecommendationKind::Opportunity]);

        let service = AnalyticsService::new(AnalyticsRules::default());
        let kinds: Vec<_> = service
            .recommendations(&snapshot(5, 10))
            .into_iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(kinds, vec![RecommendationKind::Action, RecommendationKind::Opportunity]);
    }

    #[test]
    fn test_dashboard_limit_override() {
        let service = AnalyticsService::new(AnalyticsRules::default());
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let report = service.dashboard(&snapshot(8, 100), as_of, Some(3));
        assert_eq!(report.top_performers.len(), 3);
        assert_eq!(report.total_farmers, 8);

        let report = service.dashboard(&snapshot(8, 100), as_of, None);
        assert_eq!(report.top_performers.len(), 5);
    }
}
