//! Axum route handlers for the analysis API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::document::extract_document_text;
use crate::analysis::matching::{match_products, MatchSettings};
use crate::errors::AppError;
use crate::models::product::{Product, RecommendedProduct};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct RfpAnalysisResponse {
    pub summary: String,
    pub requirements: Vec<String>,
    pub recommended_products: Vec<RecommendedProduct>,
    pub total_estimated_cost: f64,
}

/// POST /analyze-rfp
///
/// Accepts a multipart upload with a `file` part, waits out the presentation
/// delay, then returns the extracted requirements and the best catalog matches.
pub async fn handle_analyze_rfp(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RfpAnalysisResponse>, AppError> {
    let multipart = multipart?;
    let analysis_id = Uuid::new_v4();
    analyze(state, multipart)
        .instrument(info_span!("analyze_rfp", %analysis_id))
        .await
}

async fn analyze(
    state: AppState,
    mut multipart: Multipart,
) -> Result<Json<RfpAnalysisResponse>, AppError> {
    tokio::time::sleep(state.config.analysis_delay).await;

    let (file_name, data) = read_file_field(&mut multipart).await?;
    info!(
        "Received document {} ({} bytes)",
        file_name.as_deref().unwrap_or("<unnamed>"),
        data.len()
    );

    let text = extract_document_text(data).await;
    let extracted = state.extractor.extract(&text).await?;

    let settings = MatchSettings {
        procurement_volume: state.config.procurement_volume,
        cost_basis: state.config.cost_basis,
    };
    let outcome = match_products(&extracted.requirements, state.catalog.products(), settings);

    info!(
        backend = state.extractor.backend(),
        requirements = extracted.requirements.len(),
        matched = outcome.matched_count,
        returned = outcome.recommended.len(),
        cost_basis = ?settings.cost_basis,
        "Analysis complete, total estimated cost {}",
        outcome.total_estimated_cost
    );

    Ok(Json(RfpAnalysisResponse {
        summary: extracted.summary,
        requirements: extracted.requirements,
        recommended_products: outcome.recommended,
        total_estimated_cost: outcome.total_estimated_cost,
    }))
}

/// Returns the first `file` part, skipping any other form fields.
async fn read_file_field(multipart: &mut Multipart) -> Result<(Option<String>, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            let file_name = field.file_name().map(str::to_string);
            let data = field.bytes().await?;
            return Ok((file_name, data));
        }
    }

    Err(AppError::UnprocessableEntity(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

/// GET /api/v1/catalog
pub async fn handle_get_catalog(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.products().to_vec())
}
