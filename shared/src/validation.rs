//! Validation utilities for Coffee Farm Analytics
//!
//! Records that fail these checks are skipped by the aggregations rather than
//! rejected, so callers can feed raw exports straight in.

use rust_decimal::Decimal;

use crate::analytics::AnalyticsRules;
use crate::models::HarvestRecord;

// ============================================================================
// Record Validations
// ============================================================================

/// Validate that a harvest record carries everything yield aggregation needs
pub fn validate_harvest_record(record: &HarvestRecord) -> Result<(), &'static str> {
    if record.farmer_id.is_none() {
        return Err("Harvest record has no farmer");
    }
    if record.harvest_date.is_none() {
        return Err("Harvest record has no harvest date");
    }
    let dry = record
        .dry_quantity_kg
        .ok_or("Harvest record has no dry quantity")?;
    if dry < Decimal::ZERO {
        return Err("Dry quantity cannot be negative");
    }
    Ok(())
}

/// Validate that a quantity is a usable weight in kilograms
pub fn validate_quantity_kg(quantity: Decimal) -> Result<(), &'static str> {
    if quantity < Decimal::ZERO {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Rule Validations
// ============================================================================

/// Validate analytics thresholds loaded from configuration
pub fn validate_analytics_rules(rules: &AnalyticsRules) -> Result<(), &'static str> {
    validate_quantity_kg(rules.low_yield_kg)
        .map_err(|_| "Low yield threshold cannot be negative")?;
    if rules.commercial_ratio_warning < Decimal::ZERO
        || rules.commercial_ratio_warning > Decimal::ONE
    {
        return Err("Commercial ratio warning must be between 0 and 1");
    }
    if rules.top_performer_limit == 0 {
        return Err("Top performer limit must be at least 1");
    }
    if rules.active_window_months == 0 {
        return Err("Active window must be at least one month");
    }
    Ok(())
}
