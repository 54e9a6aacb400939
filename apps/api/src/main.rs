mod achievements;
mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod generation;
mod layout;
mod llm_client;
mod models;
mod render;
mod resumes;
mod routes;
mod state;
mod store;
mod users;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::generation::SummaryGenerator;
use crate::layout::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgRecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and bring the schema up to date
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;
    let store = Arc::new(PgRecordStore::new(pool));

    // Initialize summary generator (external tiers only when credentials are set)
    let summaries = SummaryGenerator::from_config(&config)
        .context("Failed to build text-generation clients")?;
    let tiers = summaries.tier_labels();
    if tiers.is_empty() {
        info!("Summary generator: rule-based fallback only");
    } else {
        info!("Summary generator tiers: {}", tiers.join(" -> "));
    }

    let page_config = default_page_config();

    // Build app state
    let state = AppState {
        store,
        summaries: Arc::new(summaries),
        page_config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Allows the configured browser origins with any method and header.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
