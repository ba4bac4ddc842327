//! Analytics handlers
//!
//! The dashboard fetches its records from the hosted database and posts them
//! here as an [`AnalyticsSnapshot`]; nothing is read from storage.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use shared::{
    AnalyticsSnapshot, DashboardReport, GrowthProjection, PerformanceCategories, Recommendation,
    YearlyAverages,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::AnalyticsService;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct DashboardQuery {
    /// Reference date for the active-farmer window (YYYY-MM-DD), defaults to today
    pub as_of: Option<String>,
    /// Size of the top performers table
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl DashboardQuery {
    fn as_of_date(&self) -> AppResult<NaiveDate> {
        match self.as_of.as_deref() {
            None => Ok(Utc::now().date_naive()),
            Some(s) => s.parse().map_err(|_| AppError::Validation {
                field: "as_of".to_string(),
                message: format!("Invalid date '{}', expected YYYY-MM-DD", s),
                message_th: format!("วันที่ '{}' ไม่ถูกต้อง ต้องเป็นรูปแบบ YYYY-MM-DD", s),
            }),
        }
    }
}

fn service(state: &AppState) -> AnalyticsService {
    AnalyticsService::new(state.config.analytics_rules())
}

/// Get average yield per farmer by year
pub async fn get_yearly_averages(
    State(state): State<AppState>,
    payload: Result<Json<AnalyticsSnapshot>, JsonRejection>,
) -> AppResult<Json<YearlyAverages>> {
    let Json(snapshot) = payload?;
    Ok(Json(service(&state).yearly_averages(&snapshot)))
}

/// Get growth rate and projected average yield
pub async fn get_growth_projection(
    State(state): State<AppState>,
    payload: Result<Json<AnalyticsSnapshot>, JsonRejection>,
) -> AppResult<Json<GrowthProjection>> {
    let Json(snapshot) = payload?;
    Ok(Json(service(&state).growth_projection(&snapshot)))
}

/// Get farmer performance tiers
pub async fn get_performance_categories(
    State(state): State<AppState>,
    payload: Result<Json<AnalyticsSnapshot>, JsonRejection>,
) -> AppResult<Json<PerformanceCategories>> {
    let Json(snapshot) = payload?;
    Ok(Json(service(&state).performance_categories(&snapshot)))
}

/// Get decision-support recommendations
pub async fn get_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<AnalyticsSnapshot>, JsonRejection>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let Json(snapshot) = payload?;
    Ok(Json(service(&state).recommendations(&snapshot)))
}

/// Get the full dashboard report
pub async fn get_dashboard(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
    payload: Result<Json<AnalyticsSnapshot>, JsonRejection>,
) -> AppResult<Json<DashboardReport>> {
    let Query(query) = query?;
    query.validate()?;
    let as_of = query.as_of_date()?;
    let Json(snapshot) = payload?;

    let report = service(&state).dashboard(&snapshot, as_of, query.limit.map(|l| l as usize));
    Ok(Json(report))
}
