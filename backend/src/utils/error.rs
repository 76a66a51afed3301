use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::i18n::get_locale;
use crate::services::analysis::AnalysisError;

/// Errors visible at the HTTP boundary.
///
/// Every upstream or parsing problem collapses into `AnalysisFailure`; the
/// carried detail is logged, never returned. `BodyTooLarge` comes from the
/// transport body limit.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailure(String),

    #[error("Request body exceeds the configured limit")]
    BodyTooLarge,
}

impl ApiError {
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::MissingInput(message.into())
    }

    pub fn analysis_failure(detail: impl std::fmt::Display) -> Self {
        Self::AnalysisFailure(detail.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingInput(_) => StatusCode::BAD_REQUEST,
            Self::AnalysisFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Get localized error message based on current locale
    pub fn localized_message(&self) -> String {
        let locale = get_locale();
        match self {
            Self::MissingInput(_) => t!("analysis.missing_input", locale = &locale).to_string(),
            Self::AnalysisFailure(_) => t!("analysis.internal_error", locale = &locale).to_string(),
            Self::BodyTooLarge => t!("analysis.body_too_large", locale = &locale).to_string(),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::MissingInput => Self::missing_input(err.to_string()),
            other => Self::analysis_failure(other),
        }
    }
}

/// Error body: `{ "error": "<message>" }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::MissingInput(detail) => tracing::warn!("Rejected analysis request: {}", detail),
            Self::AnalysisFailure(detail) => tracing::error!("AI Analysis Error: {}", detail),
            Self::BodyTooLarge => tracing::warn!("Rejected oversized analysis request"),
        }

        let body = ApiErrorResponse { error: self.localized_message() };
        (self.status_code(), Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
