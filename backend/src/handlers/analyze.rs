//! Document Analysis Handler - AI risk assessment of contract text

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::AppState;
use serde_json::Value;

use crate::models::{AnalysisRequest, AnalysisResult};
use crate::utils::{ApiError, ApiResult};

/// Analyze a document for risky clauses
///
/// The body is rejected as missing input when it carries no usable text.
/// The model's JSON reply is relayed verbatim; `AnalysisResult` documents
/// the shape it is asked to produce.
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Risk assessment", body = AnalysisResult),
        (status = 400, description = "Document text missing", body = crate::utils::error::ApiErrorResponse),
        (status = 413, description = "Request body too large", body = crate::utils::error::ApiErrorResponse),
        (status = 500, description = "Analysis failed", body = crate::utils::error::ApiErrorResponse),
    ),
    tag = "Analysis"
)]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge
        } else {
            ApiError::missing_input(rejection.body_text())
        }
    })?;

    let result = state.analysis_service.analyze(&req).await?;
    Ok(Json(result))
}
