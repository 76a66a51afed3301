use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use super::prompt::{build_risk_prompt, truncate_chars};
use super::schema::risk_response_schema;
use crate::config::AnalysisConfig;
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::services::llm::{InferenceError, InferenceService};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("document text is missing")]
    MissingInput,

    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("model reply is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct AnalysisService {
    inference: Arc<dyn InferenceService>,
    max_text_chars: usize,
    schema: serde_json::Value,
}

impl AnalysisService {
    pub fn new(inference: Arc<dyn InferenceService>, config: &AnalysisConfig) -> Self {
        Self { inference, max_text_chars: config.max_text_chars, schema: risk_response_schema() }
    }

    /// Run one analysis. The model is called at most once.
    ///
    /// The reply is only parsed as JSON and returned as-is; conformance to the
    /// declared schema is left to the model.
    pub async fn analyze(&self, req: &AnalysisRequest) -> Result<Value, AnalysisError> {
        let text = req.document_text().ok_or(AnalysisError::MissingInput)?;
        let language = req.response_language();
        let document = truncate_chars(text, self.max_text_chars);

        let analysis_id = Uuid::new_v4();
        tracing::debug!(
            %analysis_id,
            text_bytes = text.len(),
            truncated = document.len() < text.len(),
            language = language.label(),
            model = self.inference.model_name(),
            "Starting document analysis"
        );

        let prompt = build_risk_prompt(document, language);
        let raw = self.inference.generate(&prompt, &self.schema).await?;
        let result: Value = serde_json::from_str(&raw)?;

        match AnalysisResult::deserialize(&result) {
            Ok(view) => tracing::info!(
                %analysis_id,
                has_risks = view.has_risks,
                risk_count = view.risks.len(),
                "Document analysis completed"
            ),
            Err(e) => tracing::warn!(
                %analysis_id,
                "Document analysis completed; reply deviates from the schema: {}",
                e
            ),
        }
        Ok(result)
    }
}
