//! Record snapshot handed to the analytics pipeline

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, VecSkipError};
use thiserror::Error;

use super::{FarmerIdentity, HarvestRecord, PlantRecord};

/// Errors raised while decoding a snapshot payload
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Invalid snapshot JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Everything the dashboard fetched, in one bundle.
///
/// Entries that cannot be read at all (not an object, or a farmer without a
/// valid id) are dropped; the rest of the snapshot is kept.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde_as(deserialize_as = "VecSkipError<_>")]
    #[serde(default)]
    pub harvests: Vec<HarvestRecord>,
    #[serde_as(deserialize_as = "VecSkipError<_>")]
    #[serde(default)]
    pub farmers: Vec<FarmerIdentity>,
    #[serde_as(deserialize_as = "VecSkipError<_>")]
    #[serde(default)]
    pub plants: Vec<PlantRecord>,
}

impl AnalyticsSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
