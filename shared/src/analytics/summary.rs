//! Dashboard summary figures: grades, raw harvest, rankings, activity, trees and elevation

use std::collections::{BTreeMap, HashSet};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    completed_harvests, FarmerDirectory, FarmerIdentity, HarvestRecord, PlantRecord,
};
use crate::types::{DateRange, GradeTotals};

/// A farmer's total dry yield, as shown in the top performers table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmerYield {
    pub farmer_id: Uuid,
    pub display_name: String,
    pub total_yield: Decimal,
    pub farm_location: Option<String>,
}

/// Tree counts across plant declarations
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeStatistics {
    pub total_trees: u64,
    pub farmers_with_trees: usize,
    pub average_trees_per_farmer: u64,
}

/// Round half away from zero to a whole number
fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Grade shares in percent of all graded coffee, one decimal place
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GradeDistribution {
    pub premium_pct: Decimal,
    pub fine_pct: Decimal,
    pub commercial_pct: Decimal,
}

/// Sum grade quantities over all harvest records; missing values count as zero
pub fn grade_totals(harvests: &[HarvestRecord]) -> GradeTotals {
    harvests.iter().fold(GradeTotals::default(), |mut acc, h| {
        acc.premium_kg = acc
            .premium_kg
            .saturating_add(h.premium_grade_kg.unwrap_or_default());
        acc.fine_kg = acc.fine_kg.saturating_add(h.fine_grade_kg.unwrap_or_default());
        acc.commercial_kg = acc
            .commercial_kg
            .saturating_add(h.commercial_grade_kg.unwrap_or_default());
        acc
    })
}

fn share_pct(part: Decimal, total: Decimal) -> Decimal {
    part.checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}

/// Percentage split of the grade totals. All zero when nothing was graded.
pub fn grade_distribution(grades: &GradeTotals) -> GradeDistribution {
    let total = grades.total();
    if total <= Decimal::ZERO {
        return GradeDistribution::default();
    }
    GradeDistribution {
        premium_pct: share_pct(grades.premium_kg, total),
        fine_pct: share_pct(grades.fine_kg, total),
        commercial_pct: share_pct(grades.commercial_kg, total),
    }
}

/// Raw quantity of a record when it is usable: present and positive
fn raw_quantity(harvest: &HarvestRecord) -> Option<Decimal> {
    harvest.raw_quantity_kg.filter(|q| *q > Decimal::ZERO)
}

/// Total fresh cherry weight over all records, whether or not they are complete
pub fn total_raw_harvest(harvests: &[HarvestRecord]) -> Decimal {
    harvests
        .iter()
        .filter_map(raw_quantity)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Raw harvest per calendar month, keyed `YYYY-MM` in ascending order.
/// Records without a date or a raw quantity are left out.
pub fn monthly_raw_harvest(harvests: &[HarvestRecord]) -> BTreeMap<String, Decimal> {
    let mut months: BTreeMap<String, Decimal> = BTreeMap::new();
    for harvest in harvests {
        let (Some(date), Some(raw)) = (harvest.harvest_date, raw_quantity(harvest)) else {
            continue;
        };
        let total = months.entry(date.format("%Y-%m").to_string()).or_default();
        *total = total.saturating_add(raw);
    }
    months
}

/// Farmers ranked by total dry yield, highest first (ties by farmer id),
/// truncated to `limit`.
pub fn rank_farmers_by_yield(
    harvests: &[HarvestRecord],
    identities: &[FarmerIdentity],
    limit: usize,
) -> Vec<FarmerYield> {
    let mut totals: BTreeMap<Uuid, Decimal> = BTreeMap::new();
    for harvest in completed_harvests(harvests) {
        let total = totals.entry(harvest.farmer_id).or_default();
        *total = total.saturating_add(harvest.dry_quantity_kg);
    }

    let directory = FarmerDirectory::new(identities);
    let mut ranked: Vec<FarmerYield> = totals
        .into_iter()
        .map(|(farmer_id, total_yield)| FarmerYield {
            farmer_id,
            display_name: directory.display_name(&farmer_id),
            total_yield,
            farm_location: directory
                .get(&farmer_id)
                .and_then(|f| f.farm_location.clone()),
        })
        .collect();

    ranked.sort_by(|a, b| b.total_yield.cmp(&a.total_yield));
    ranked.truncate(limit);
    ranked
}

/// Distinct farmers with a harvest on or after the start of `window`.
/// Only the farmer and the date are needed; quantities are not checked.
pub fn count_active_farmers(harvests: &[HarvestRecord], window: &DateRange) -> usize {
    harvests
        .iter()
        .filter_map(|h| match (h.farmer_id, h.harvest_date) {
            (Some(farmer_id), Some(date)) if date >= window.start => Some(farmer_id),
            _ => None,
        })
        .collect::<HashSet<_>>()
        .len()
}

/// Total trees and the rounded average per farmer that declared plants
pub fn tree_statistics(plants: &[PlantRecord]) -> TreeStatistics {
    let mut per_farmer: BTreeMap<Uuid, u64> = BTreeMap::new();
    for plant in plants {
        if let Some(farmer_id) = plant.farmer_id {
            let trees = per_farmer.entry(farmer_id).or_default();
            *trees = trees.saturating_add(u64::from(plant.trees_planted.unwrap_or(0)));
        }
    }

    let total_trees = per_farmer.values().fold(0u64, |acc, n| acc.saturating_add(*n));
    let farmers_with_trees = per_farmer.len();
    let average_trees_per_farmer = if farmers_with_trees == 0 {
        0
    } else {
        round_whole(Decimal::from(total_trees) / Decimal::from(farmers_with_trees))
            .to_u64()
            .unwrap_or(0)
    };

    TreeStatistics {
        total_trees,
        farmers_with_trees,
        average_trees_per_farmer,
    }
}

/// Rounded mean of recorded farm elevations, ignoring missing and non-positive values
pub fn average_farm_elevation(identities: &[FarmerIdentity]) -> Decimal {
    let elevations: Vec<Decimal> = identities
        .iter()
        .filter_map(|f| f.farm_elevation_m)
        .filter(|e| *e > Decimal::ZERO)
        .collect();

    if elevations.is_empty() {
        return Decimal::ZERO;
    }
    let total = elevations
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(*e));
    round_whole(total / Decimal::from(elevations.len()))
}
