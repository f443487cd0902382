// libs/triage-cell/src/handlers.rs
use axum::Json;
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{AnalysisResponse, AnalyzeRequest};
use crate::services::probability;

#[axum::debug_handler]
pub async fn analyze_symptoms(
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    debug!("Analyzing {} submitted symptoms", request.symptoms.len());
    Ok(Json(probability::analyze(&request.symptoms)))
}
