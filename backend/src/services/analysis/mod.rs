//! Document risk analysis
//!
//! Validates the request, builds the prompt and relays the model's
//! structured answer.

mod prompt;
mod schema;
mod service;

pub use prompt::{build_risk_prompt, truncate_chars};
pub use schema::risk_response_schema;
pub use service::{AnalysisError, AnalysisService};
