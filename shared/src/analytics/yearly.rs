//! Yearly productivity: average yield per farmer for each harvest year

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{completed_harvests, HarvestRecord};

/// Harvest totals for one calendar year
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyBucket {
    pub year: i32,
    pub total_yield: Decimal,
    pub farmer_ids: BTreeSet<Uuid>,
}

impl YearlyBucket {
    fn new(year: i32) -> Self {
        Self {
            year,
            total_yield: Decimal::ZERO,
            farmer_ids: BTreeSet::new(),
        }
    }

    pub fn farmer_count(&self) -> usize {
        self.farmer_ids.len()
    }

    /// Total yield divided by distinct farmers, 0 for a year without farmers
    pub fn average_yield(&self) -> Decimal {
        match self.farmer_count() {
            0 => Decimal::ZERO,
            n => self.total_yield / Decimal::from(n),
        }
    }
}

/// Per-year figures, keyed by ascending year
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct YearlyAverages {
    pub average_yield: BTreeMap<i32, Decimal>,
    pub farmer_count: BTreeMap<i32, usize>,
    pub total_yield: BTreeMap<i32, Decimal>,
}

impl YearlyAverages {
    pub fn is_empty(&self) -> bool {
        self.average_yield.is_empty()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.average_yield.keys().copied()
    }
}

/// Group complete harvest records by the calendar year of their harvest date.
/// A farmer is counted once per year no matter how many harvests they report.
/// Totals saturate at `Decimal::MAX` instead of overflowing.
pub fn bucket_by_year(harvests: &[HarvestRecord]) -> BTreeMap<i32, YearlyBucket> {
    let mut buckets: BTreeMap<i32, YearlyBucket> = BTreeMap::new();

    for harvest in completed_harvests(harvests) {
        let year = harvest.year();
        let bucket = buckets
            .entry(year)
            .or_insert_with(|| YearlyBucket::new(year));
        bucket.total_yield = bucket.total_yield.saturating_add(harvest.dry_quantity_kg);
        bucket.farmer_ids.insert(harvest.farmer_id);
    }

    buckets
}

/// Compute average yield per farmer for every harvest year
pub fn compute_yearly_averages(harvests: &[HarvestRecord]) -> YearlyAverages {
    let buckets = bucket_by_year(harvests);

    let mut averages = YearlyAverages::default();
    for (year, bucket) in &buckets {
        averages.average_yield.insert(*year, bucket.average_yield());
        averages.farmer_count.insert(*year, bucket.farmer_count());
        averages.total_yield.insert(*year, bucket.total_yield);
    }

    tracing::debug!(
        years = buckets.len(),
        average_yield = ?averages.average_yield,
        farmer_count = ?averages.farmer_count,
        "Computed yearly averages"
    );

    averages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn harvest(farmer: Uuid, year: i32, dry: i64) -> HarvestRecord {
        HarvestRecord::new(
            farmer,
            NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            Decimal::from(dry),
        )
    }

    #[test]
    fn test_average_per_distinct_farmer() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let harvests = vec![
            harvest(a, 2022, 40),
            harvest(b, 2022, 60),
            harvest(a, 2023, 50),
            harvest(b, 2023, 70),
        ];

        let averages = compute_yearly_averages(&harvests);
        assert_eq!(averages.average_yield[&2022], Decimal::from(50));
        assert_eq!(averages.average_yield[&2023], Decimal::from(60));
        assert_eq!(averages.farmer_count[&2022], 2);
        assert_eq!(averages.years().collect::<Vec<_>>(), vec![2022, 2023]);
    }

    #[test]
    fn test_farmer_counted_once_per_year() {
        let a = Uuid::new_v4();
        let harvests = vec![harvest(a, 2024, 10), harvest(a, 2024, 20), harvest(a, 2024, 30)];

        let buckets = bucket_by_year(&harvests);
        assert_eq!(buckets[&2024].farmer_count(), 1);
        assert_eq!(buckets[&2024].total_yield, Decimal::from(60));
        assert_eq!(buckets[&2024].average_yield(), Decimal::from(60));
    }

    #[test]
    fn test_incomplete_records_skipped() {
        let a = Uuid::new_v4();
        let mut missing_dry = harvest(a, 2021, 99);
        missing_dry.dry_quantity_kg = None;
        let mut missing_farmer = harvest(a, 2021, 99);
        missing_farmer.farmer_id = None;

        let harvests = vec![missing_dry, missing_farmer, harvest(a, 2022, 5)];
        let averages = compute_yearly_averages(&harvests);
        assert_eq!(averages.years().collect::<Vec<_>>(), vec![2022]);
    }

    #[test]
    fn test_empty_bucket_average_is_zero() {
        assert_eq!(YearlyBucket::new(2020).average_yield(), Decimal::ZERO);
        assert!(compute_yearly_averages(&[]).is_empty());
    }

    #[test]
    fn test_years_sorted_regardless_of_input_order() {
        let a = Uuid::new_v4();
        let harvests = vec![harvest(a, 2024, 1), harvest(a, 2019, 1), harvest(a, 2021, 1)];
        let averages = compute_yearly_averages(&harvests);
        assert_eq!(averages.years().collect::<Vec<_>>(), vec![2019, 2021, 2024]);
    }

    #[test]
    fn test_year_total_saturates_instead_of_overflowing() {
        let day = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
        let harvests = vec![
            HarvestRecord::new(Uuid::new_v4(), day, Decimal::MAX),
            HarvestRecord::new(Uuid::new_v4(), day, Decimal::MAX),
        ];

        let averages = compute_yearly_averages(&harvests);
        assert_eq!(averages.total_yield[&2022], Decimal::MAX);
        assert_eq!(averages.average_yield[&2022], Decimal::MAX / Decimal::TWO);
    }
}
