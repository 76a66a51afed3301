pub mod analysis;
pub mod llm;

pub use analysis::{AnalysisError, AnalysisService};
pub use llm::{GeminiClient, InferenceError, InferenceService};
