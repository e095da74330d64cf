mod config;
mod db;
mod errors;
mod matching;
mod models;
mod notifications;
mod routes;
mod skills;
mod state;
mod store;
mod team;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::matching::fit_scoring::WeightedFitScorer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Campus API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.db_max_connections).await?;
    if config.run_migrations {
        run_migrations(&db).await?;
    }

    let fit_scorer = Arc::new(WeightedFitScorer::default());
    info!(
        "Fit scorer weights: skill={} cgpa={}",
        fit_scorer.weights.skill, fit_scorer.weights.cgpa
    );

    // Build app state
    let state = AppState {
        store: Arc::new(PgStore::new(db)),
        fit_scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the campus frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
