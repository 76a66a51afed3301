//! Clauseg backend
//!
//! Single-endpoint service that asks Gemini for a structured risk
//! assessment of a contract or agreement.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::config::{AnalysisConfig, Config};
use crate::services::analysis::AnalysisService;
use crate::services::llm::{GeminiClient, InferenceService};

rust_i18n::i18n!("locales", fallback = "uz");

/// Shared application state, immutable after startup
pub struct AppState {
    pub analysis_service: AnalysisService,
    pub body_limit_bytes: usize,
}

impl AppState {
    /// Build the state with the Gemini client described by `config`
    pub fn new(config: &Config) -> Self {
        let inference: Arc<dyn InferenceService> = Arc::new(GeminiClient::new(&config.gemini));
        Self::with_inference(inference, &config.analysis)
    }

    /// Build the state around any inference backend
    pub fn with_inference(inference: Arc<dyn InferenceService>, config: &AnalysisConfig) -> Self {
        Self {
            analysis_service: AnalysisService::new(inference, config),
            body_limit_bytes: config.body_limit_bytes,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::analyze::analyze),
    components(schemas(
        models::AnalysisRequest,
        models::AnalysisResult,
        models::RiskItem,
        models::RiskLevel,
        utils::error::ApiErrorResponse,
    )),
    tags((name = "Analysis", description = "Document risk analysis"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the router with all routes and layers
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.body_limit_bytes;

    Router::new()
        .route("/api/analyze", post(handlers::analyze::analyze))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::locale_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
