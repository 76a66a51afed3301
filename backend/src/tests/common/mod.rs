// Common test utilities and helpers

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{
        Request, StatusCode,
        header::{ACCEPT_LANGUAGE, CONTENT_TYPE},
    },
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::AnalysisConfig;
use crate::services::llm::{InferenceError, InferenceService};
use crate::{AppState, create_router};

/// What the mock answers to every call
pub enum MockReply {
    Text(String),
    Upstream(String),
}

/// Inference double that records every prompt and schema it receives
pub struct MockInferenceService {
    reply: MockReply,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockInferenceService {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { reply: MockReply::Text(text.into()), calls: Mutex::new(Vec::new()) })
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { reply: MockReply::Upstream(message.into()), calls: Mutex::new(Vec::new()) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        self.calls.lock().unwrap().last().map(|(p, _)| p.clone()).expect("no call recorded")
    }

    pub fn last_schema(&self) -> Value {
        self.calls.lock().unwrap().last().map(|(_, s)| s.clone()).expect("no call recorded")
    }
}

#[async_trait]
impl InferenceService for MockInferenceService {
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<String, InferenceError> {
        self.calls.lock().unwrap().push((prompt.to_string(), schema.clone()));
        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Upstream(message) => Err(InferenceError::Upstream(message.clone())),
        }
    }

    fn is_available(&self) -> bool {
        true
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// A schema-compliant model reply
pub fn sample_result_json() -> Value {
    serde_json::json!({
        "hasRisks": true,
        "risks": [
            {
                "clause": "The lessee waives all rights to a refund.",
                "level": "high",
                "explanation": "The clause removes any possibility of getting the deposit back."
            },
            {
                "clause": "Fees may change at the lessor's discretion.",
                "level": "medium",
                "explanation": "Unilateral price changes are not bounded."
            }
        ],
        "summary": "The agreement strongly favours the lessor."
    })
}

/// Router over `inference` with default analysis settings
pub fn test_app(inference: Arc<dyn InferenceService>) -> Router {
    test_app_with_config(inference, &AnalysisConfig::default())
}

pub fn test_app_with_config(inference: Arc<dyn InferenceService>, config: &AnalysisConfig) -> Router {
    create_router(Arc::new(AppState::with_inference(inference, config)))
}

/// POST a raw body to /api/analyze and decode the JSON reply
pub async fn post_analyze(
    app: Router,
    body: impl Into<Body>,
    accept_language: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(CONTENT_TYPE, "application/json");
    if let Some(lang) = accept_language {
        builder = builder.header(ACCEPT_LANGUAGE, lang);
    }

    let response = app
        .oneshot(builder.body(body.into()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
