mod analysis;
mod catalog;
mod config;
mod errors;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::extractor::{RequirementExtractor, SimulatedExtractor};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RFP Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Load the product catalog (missing file falls back to the embedded list)
    let catalog = Catalog::load(&config.catalog_path)?;
    info!(
        "Catalog loaded: {} products ({:?})",
        catalog.len(),
        catalog.source()
    );
    if catalog.is_empty() {
        warn!("Catalog is empty, every analysis will recommend no products");
    }

    let extractor = Arc::new(SimulatedExtractor);
    info!(
        "Requirement extractor: {} (delay {}ms, cost basis {:?})",
        extractor.backend(),
        config.analysis_delay.as_millis(),
        config.cost_basis
    );

    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
        extractor,
    };

    // The browser frontend is served from a different origin
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
