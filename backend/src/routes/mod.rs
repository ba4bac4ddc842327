//! Route definitions for the Coffee Farm Analytics Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Analytics over posted record snapshots
        .nest("/analytics", analytics_routes())
}

/// Analytics routes
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/yearly", post(handlers::get_yearly_averages))
        .route("/growth", post(handlers::get_growth_projection))
        .route("/performance", post(handlers::get_performance_categories))
        .route("/recommendations", post(handlers::get_recommendations))
        .route("/dashboard", post(handlers::get_dashboard))
}
