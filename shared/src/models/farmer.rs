//! Farmer identity and plant declaration models

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use uuid::Uuid;

use crate::types::UNKNOWN_FARMER_NAME;

/// A registered farmer and their farm details
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FarmerIdentity {
    #[serde(alias = "id")]
    pub farmer_id: Uuid,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub farm_location: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "farm_elevation")]
    pub farm_elevation_m: Option<Decimal>,
}

impl FarmerIdentity {
    pub fn new(farmer_id: Uuid, first_name: &str, last_name: &str) -> Self {
        Self {
            farmer_id,
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            ..Default::default()
        }
    }

    /// "First Last", falling back to [`UNKNOWN_FARMER_NAME`] when no name is on record
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            UNKNOWN_FARMER_NAME.to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// A plant declaration row (one variety planted on a farm)
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlantRecord {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub farmer_id: Option<Uuid>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "number_of_tree_planted")]
    pub trees_planted: Option<u32>,
}

impl PlantRecord {
    pub fn new(farmer_id: Uuid, trees_planted: u32) -> Self {
        Self {
            farmer_id: Some(farmer_id),
            trees_planted: Some(trees_planted),
        }
    }
}

/// Lookup from farmer id to identity, used to resolve display names
pub struct FarmerDirectory<'a> {
    by_id: HashMap<Uuid, &'a FarmerIdentity>,
}

impl<'a> FarmerDirectory<'a> {
    pub fn new(identities: &'a [FarmerIdentity]) -> Self {
        let by_id = identities.iter().map(|f| (f.farmer_id, f)).collect();
        Self { by_id }
    }

    pub fn get(&self, farmer_id: &Uuid) -> Option<&'a FarmerIdentity> {
        self.by_id.get(farmer_id).copied()
    }

    /// Display name for a farmer, "Unknown Farmer" when not in the directory
    pub fn display_name(&self, farmer_id: &Uuid) -> String {
        self.get(farmer_id)
            .map(FarmerIdentity::display_name)
            .unwrap_or_else(|| UNKNOWN_FARMER_NAME.to_string())
    }
}
