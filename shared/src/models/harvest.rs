//! Harvest models

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use uuid::Uuid;

use crate::validation::validate_harvest_record;

/// A harvest report as submitted by a farmer.
///
/// Every field is optional because reports arrive from forms and imports that
/// may leave columns blank. A value that does not parse (an empty date, a
/// quantity like "n/a") is read as missing. Aggregations decide per metric
/// which fields they need; see [`HarvestRecord::completed`].
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HarvestRecord {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub farmer_id: Option<Uuid>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub harvest_date: Option<NaiveDate>,
    /// Fresh cherry weight
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "coffee_raw_quantity")]
    pub raw_quantity_kg: Option<Decimal>,
    /// Processed (dried) weight, the yield metric used for ranking
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "coffee_dry_quantity")]
    pub dry_quantity_kg: Option<Decimal>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "coffee_premium_grade")]
    pub premium_grade_kg: Option<Decimal>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "coffee_fine_grade")]
    pub fine_grade_kg: Option<Decimal>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "coffee_commercial_grade")]
    pub commercial_grade_kg: Option<Decimal>,
}

/// The fields of a harvest record that yield aggregation relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedHarvest {
    pub farmer_id: Uuid,
    pub harvest_date: NaiveDate,
    pub dry_quantity_kg: Decimal,
}

impl CompletedHarvest {
    pub fn year(&self) -> i32 {
        self.harvest_date.year()
    }
}

impl HarvestRecord {
    /// Create a complete record with only the yield fields set
    pub fn new(farmer_id: Uuid, harvest_date: NaiveDate, dry_quantity_kg: Decimal) -> Self {
        Self {
            farmer_id: Some(farmer_id),
            harvest_date: Some(harvest_date),
            dry_quantity_kg: Some(dry_quantity_kg),
            ..Default::default()
        }
    }

    /// Attach grade breakdown
    pub fn with_grades(mut self, premium: Decimal, fine: Decimal, commercial: Decimal) -> Self {
        self.premium_grade_kg = Some(premium);
        self.fine_grade_kg = Some(fine);
        self.commercial_grade_kg = Some(commercial);
        self
    }

    /// Returns the yield fields if the record is complete, None otherwise
    pub fn completed(&self) -> Option<CompletedHarvest> {
        validate_harvest_record(self).ok()?;
        Some(CompletedHarvest {
            farmer_id: self.farmer_id?,
            harvest_date: self.harvest_date?,
            dry_quantity_kg: self.dry_quantity_kg?,
        })
    }
}

/// Keep only complete harvest records, in input order
pub fn completed_harvests(harvests: &[HarvestRecord]) -> impl Iterator<Item = CompletedHarvest> + '_ {
    harvests.iter().filter_map(HarvestRecord::completed)
}
