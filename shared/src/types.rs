//! Common types used across the platform

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display name used when a farmer has no name on record
pub const UNKNOWN_FARMER_NAME: &str = "Unknown Farmer";

/// Reporting window ending on `end`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range covering the `months` calendar months leading up to `as_of`.
    /// Returns None if the start would fall before the supported calendar.
    pub fn trailing_months(as_of: NaiveDate, months: u32) -> Option<Self> {
        let start = as_of.checked_sub_months(Months::new(months))?;
        Some(Self { start, end: as_of })
    }
}

/// Aggregate kilograms per quality grade
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GradeTotals {
    pub premium_kg: Decimal,
    pub fine_kg: Decimal,
    pub commercial_kg: Decimal,
}

impl GradeTotals {
    pub fn new(premium_kg: Decimal, fine_kg: Decimal, commercial_kg: Decimal) -> Self {
        Self {
            premium_kg,
            fine_kg,
            commercial_kg,
        }
    }

    /// Sum of all grades, saturating at `Decimal::MAX`
    pub fn total(&self) -> Decimal {
        self.premium_kg
            .saturating_add(self.fine_kg)
            .saturating_add(self.commercial_kg)
    }

    /// Share of commercial grade in the total, None when nothing was graded
    pub fn commercial_ratio(&self) -> Option<Decimal> {
        let total = self.total();
        if total <= Decimal::ZERO {
            return None;
        }
        self.commercial_kg.checked_div(total)
    }
}
