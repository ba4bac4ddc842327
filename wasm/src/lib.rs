//! WebAssembly module for Coffee Farm Analytics Platform
//!
//! Lets the dashboard run the analytics pipeline client-side on the records it
//! already fetched:
//! - Yearly productivity and growth projection
//! - Farmer performance tiers
//! - Decision-support recommendations
//! - Full dashboard report
//!
//! Every function takes and returns JSON strings.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::analytics::*;
pub use shared::models::*;
pub use shared::types::*;

fn parse_snapshot(snapshot_json: &str) -> Result<AnalyticsSnapshot, String> {
    AnalyticsSnapshot::from_json(snapshot_json).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize result: {}", e))
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn yearly_averages(snapshot_json: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    to_json(&compute_yearly_averages(&snapshot.harvests))
}

fn growth_projection(snapshot_json: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let yearly = compute_yearly_averages(&snapshot.harvests);
    to_json(&compute_growth_projection(&yearly))
}

fn performance(snapshot_json: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    to_json(&classify_performance(&snapshot.harvests, &snapshot.farmers))
}

fn recommendations(snapshot_json: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let rules = AnalyticsRules::default();
    let ranked = rank_farmers_by_yield(
        &snapshot.harvests,
        &snapshot.farmers,
        rules.top_performer_limit,
    );
    let grades = grade_totals(&snapshot.harvests);
    to_json(&generate_recommendations(&ranked, &grades, &rules))
}

fn dashboard(snapshot_json: &str, as_of: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let as_of: NaiveDate = as_of
        .parse()
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", as_of))?;
    to_json(&build_dashboard(&snapshot, as_of, &AnalyticsRules::default()))
}

/// Average yield per farmer by year
#[wasm_bindgen]
pub fn compute_yearly_averages_json(snapshot_json: &str) -> Result<String, JsValue> {
    yearly_averages(snapshot_json).map_err(to_js_error)
}

/// Growth rate and projected average yield
#[wasm_bindgen]
pub fn compute_growth_projection_json(snapshot_json: &str) -> Result<String, JsValue> {
    growth_projection(snapshot_json).map_err(to_js_error)
}

/// Farmer performance tiers
#[wasm_bindgen]
pub fn classify_performance_json(snapshot_json: &str) -> Result<String, JsValue> {
    performance(snapshot_json).map_err(to_js_error)
}

/// Decision-support recommendations
#[wasm_bindgen]
pub fn generate_recommendations_json(snapshot_json: &str) -> Result<String, JsValue> {
    recommendations(snapshot_json).map_err(to_js_error)
}

/// Full dashboard report; `as_of` is the reference date (YYYY-MM-DD)
#[wasm_bindgen]
pub fn build_dashboard_json(snapshot_json: &str, as_of: &str) -> Result<String, JsValue> {
    dashboard(snapshot_json, as_of).map_err(to_js_error)
}

/// Today's date in the browser, formatted for `build_dashboard_json`
#[wasm_bindgen]
pub fn today_iso_date() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}
