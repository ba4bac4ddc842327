//! Farmer performance tiers
//!
//! Farmers are ranked by average dry yield per harvest and split into three
//! tiers using the 20th and 80th percentile (counted from the top) as cut-offs.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{completed_harvests, FarmerDirectory, FarmerIdentity, HarvestRecord};

/// A farmer's yield across all complete harvest records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmerPerformance {
    pub farmer_id: Uuid,
    pub display_name: String,
    pub total_yield: Decimal,
    /// Always at least 1
    pub harvest_count: usize,
    pub average_yield: Decimal,
}

/// Performance tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    High,
    Average,
    NeedsSupport,
}

/// Farmers in one tier
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TierSummary {
    pub count: usize,
    pub farmers: Vec<String>,
}

/// Tier membership plus the thresholds that produced it
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PerformanceCategories {
    pub high: TierSummary,
    pub average: TierSummary,
    pub needs_support: TierSummary,
    pub high_threshold: Decimal,
    pub low_threshold: Decimal,
}

/// Average yield per farmer, ordered by descending average (ties by farmer id).
/// Farmers without a complete harvest record do not appear.
pub fn farmer_performances(
    harvests: &[HarvestRecord],
    identities: &[FarmerIdentity],
) -> Vec<FarmerPerformance> {
    let mut totals: BTreeMap<Uuid, (Decimal, usize)> = BTreeMap::new();
    for harvest in completed_harvests(harvests) {
        let entry = totals.entry(harvest.farmer_id).or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(harvest.dry_quantity_kg);
        entry.1 += 1;
    }

    let directory = FarmerDirectory::new(identities);
    let mut performances: Vec<FarmerPerformance> = totals
        .into_iter()
        .map(|(farmer_id, (total_yield, harvest_count))| FarmerPerformance {
            farmer_id,
            display_name: directory.display_name(&farmer_id),
            total_yield,
            harvest_count,
            average_yield: total_yield / Decimal::from(harvest_count),
        })
        .collect();

    // Stable sort keeps the id order from the BTreeMap for equal averages
    performances.sort_by(|a, b| b.average_yield.cmp(&a.average_yield));
    performances
}

/// Value at `index` of a descending distribution, 0 when out of range
fn threshold_at(sorted_desc: &[Decimal], index: usize) -> Decimal {
    sorted_desc.get(index).copied().unwrap_or(Decimal::ZERO)
}

/// Cut-offs for the High and NeedsSupport tiers.
///
/// High is the value at rank floor(n * 0.2) and NeedsSupport at rank
/// floor(n * 0.8) of the averages sorted descending.
pub fn tier_thresholds(performances: &[FarmerPerformance]) -> (Decimal, Decimal) {
    let mut sorted: Vec<Decimal> = performances.iter().map(|f| f.average_yield).collect();
    sorted.sort_by(|a, b| b.cmp(a));

    let n = sorted.len();
    let high = threshold_at(&sorted, n / 5);
    let low = threshold_at(&sorted, n * 4 / 5);
    (high, low)
}

/// Tiers a single average falls into.
///
/// The three checks are independent: when the thresholds coincide an average
/// can be both High and NeedsSupport.
pub fn tiers_for(
    average_yield: Decimal,
    high_threshold: Decimal,
    low_threshold: Decimal,
) -> Vec<PerformanceTier> {
    let mut tiers = Vec::with_capacity(2);
    if average_yield >= high_threshold {
        tiers.push(PerformanceTier::High);
    }
    if average_yield < high_threshold && average_yield > low_threshold {
        tiers.push(PerformanceTier::Average);
    }
    if average_yield <= low_threshold {
        tiers.push(PerformanceTier::NeedsSupport);
    }
    tiers
}

fn tier_summary(
    performances: &[FarmerPerformance],
    tier: PerformanceTier,
    high_threshold: Decimal,
    low_threshold: Decimal,
) -> TierSummary {
    let farmers: Vec<String> = performances
        .iter()
        .filter(|f| tiers_for(f.average_yield, high_threshold, low_threshold).contains(&tier))
        .map(|f| f.display_name.clone())
        .collect();
    TierSummary {
        count: farmers.len(),
        farmers,
    }
}

/// Classify farmers into High / Average / NeedsSupport by average yield
pub fn classify_performance(
    harvests: &[HarvestRecord],
    identities: &[FarmerIdentity],
) -> PerformanceCategories {
    let performances = farmer_performances(harvests, identities);
    let (high_threshold, low_threshold) = tier_thresholds(&performances);

    let categories = PerformanceCategories {
        high: tier_summary(&performances, PerformanceTier::High, high_threshold, low_threshold),
        average: tier_summary(&performances, PerformanceTier::Average, high_threshold, low_threshold),
        needs_support: tier_summary(
            &performances,
            PerformanceTier::NeedsSupport,
            high_threshold,
            low_threshold,
        ),
        high_threshold,
        low_threshold,
    };

    tracing::debug!(
        farmers = performances.len(),
        high_threshold = %high_threshold,
        low_threshold = %low_threshold,
        high = categories.high.count,
        average = categories.average.count,
        needs_support = categories.needs_support.count,
        "Classified farmer performance"
    );

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn harvest(farmer: Uuid, dry: i64) -> HarvestRecord {
        HarvestRecord::new(
            farmer,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            Decimal::from(dry),
        )
    }

    #[test]
    fn test_three_farmer_example() {
        let a = FarmerIdentity::new(Uuid::new_v4(), "Arthit", "Saelim");
        let b = FarmerIdentity::new(Uuid::new_v4(), "Boonmee", "Srisuk");
        let c = FarmerIdentity::new(Uuid::new_v4(), "Chai", "Wongsa");
        let harvests = vec![
            harvest(a.farmer_id, 30),
            harvest(b.farmer_id, 40),
            harvest(c.farmer_id, 1000),
        ];

        let categories = classify_performance(&harvests, &[a, b, c]);
        assert_eq!(categories.high_threshold, Decimal::from(1000));
        assert_eq!(categories.low_threshold, Decimal::from(30));
        assert_eq!(categories.high.farmers, vec!["Chai Wongsa"]);
        assert_eq!(categories.average.farmers, vec!["Boonmee Srisuk"]);
        assert_eq!(categories.needs_support.farmers, vec!["Arthit Saelim"]);
    }

    #[test]
    fn test_average_uses_harvest_count() {
        let a = Uuid::new_v4();
        let harvests = vec![harvest(a, 10), harvest(a, 30)];
        let performances = farmer_performances(&harvests, &[]);
        assert_eq!(performances.len(), 1);
        assert_eq!(performances[0].harvest_count, 2);
        assert_eq!(performances[0].average_yield, Decimal::from(20));
        assert_eq!(performances[0].display_name, "Unknown Farmer");
    }

    #[test]
    fn test_single_farmer_is_high_and_needs_support() {
        // Thresholds coincide with one farmer, so both boundary checks pass
        let harvests = vec![harvest(Uuid::new_v4(), 25)];
        let categories = classify_performance(&harvests, &[]);
        assert_eq!(categories.high.count, 1);
        assert_eq!(categories.average.count, 0);
        assert_eq!(categories.needs_support.count, 1);
    }

    #[test]
    fn test_empty_input() {
        let categories = classify_performance(&[], &[]);
        assert_eq!(categories, PerformanceCategories::default());
    }

    #[test]
    fn test_names_ordered_by_average_desc() {
        let ids: Vec<Uuid> = (0..10).map(|_| Uuid::new_v4()).collect();
        let harvests: Vec<HarvestRecord> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| harvest(*id, (i as i64 + 1) * 10))
            .collect();
        let farmers: Vec<FarmerIdentity> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| FarmerIdentity::new(*id, "Farmer", &format!("{:02}", i + 1)))
            .collect();

        let categories = classify_performance(&harvests, &farmers);
        // n = 10: high threshold at rank 2 (80), low threshold at rank 8 (20)
        assert_eq!(categories.high.farmers, vec!["Farmer 10", "Farmer 09", "Farmer 08"]);
        assert_eq!(categories.needs_support.farmers, vec!["Farmer 02", "Farmer 01"]);
        assert_eq!(categories.average.count, 5);
        assert_eq!(categories.average.farmers.first().map(String::as_str), Some("Farmer 07"));
    }

    #[test]
    fn test_tiers_for_overlap() {
        let t = Decimal::from(10);
        assert_eq!(
            tiers_for(t, t, t),
            vec![PerformanceTier::High, PerformanceTier::NeedsSupport]
        );
        assert_eq!(
            tiers_for(Decimal::from(5), Decimal::from(8), Decimal::from(3)),
            vec![PerformanceTier::Average]
        );
    }
}
