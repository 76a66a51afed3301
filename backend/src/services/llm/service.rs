use async_trait::async_trait;

use super::models::InferenceError;

/// A generative model that answers a prompt under a declared response schema.
///
/// Implementations are shared across concurrent requests behind an `Arc`.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Send `prompt` once and return the raw reply text.
    ///
    /// `schema` uses the Gemini OpenAPI subset (`OBJECT`, `ARRAY`, ...).
    async fn generate(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, InferenceError>;

    /// Whether a credential is configured.
    fn is_available(&self) -> bool;

    fn model_name(&self) -> &str;
}
