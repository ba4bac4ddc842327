//! Coffee Farm Analytics Platform - Backend Server
//!
//! Serves farmer performance analytics for cooperative administrators:
//! yearly productivity, growth projection, performance tiers and
//! decision-support recommendations.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use error::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cfa_server=debug,shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;
    shared::validate_analytics_rules(&config.analytics_rules())
        .map_err(|e| AppError::Configuration(e.to_string()))?;

    tracing::info!("Starting Coffee Farm Analytics Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::debug!("Analytics rules: {:?}", config.analytics);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| AppError::Configuration(format!("Invalid server address: {}", e)))?;

    // Create application state
    let state = AppState {
        config: Arc::new(config),
    };

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Coffee Farm Analytics Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Fallback for unknown routes
async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(format!("Route {}", uri.path()))
}
