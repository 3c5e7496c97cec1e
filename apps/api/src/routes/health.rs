use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and where the catalog was loaded from.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "rfp-analyzer-api",
        "catalog_source": state.catalog.source(),
        "catalog_size": state.catalog.len()
    }))
}
