//! Leaderboard API Server
//!
//! Ranks referral agents from an Airtable table and serves the result as JSON
//! and as a markdown dashboard.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;
mod render;

#[cfg(test)]
mod test_utils;


use adapters::{AirtableClientImpl, SystemClock};
use app::LeaderboardService;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub leaderboard: Arc<LeaderboardService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with all routes and middleware
fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/agents", get(handlers::list_agents))
        .route("/api/refresh", post(handlers::refresh))
        .route("/leaderboard", get(handlers::get_dashboard))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,leaderboard_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting leaderboard API...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        "Reading {}/{} (view: {:?}), cache TTL {}s",
        config.airtable_base_id,
        config.airtable_table_name,
        config.airtable_view,
        config.cache_ttl_secs
    );
    tracing::debug!("{:?}", config);

    // Create adapters
    let airtable = Arc::new(AirtableClientImpl::new(
        config.airtable_api_url.clone(),
        config.airtable_api_key.clone(),
    ));
    let clock = Arc::new(SystemClock);

    // Create application services
    let leaderboard = Arc::new(LeaderboardService::new(
        airtable,
        config.table_query(),
        config.fields.clone(),
        clock,
        config.cache_ttl(),
    ));

    let app = router(AppState { leaderboard });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
