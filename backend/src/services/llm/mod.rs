//! LLM Service Module
//!
//! Generic inference capability used by document analysis.
//!
//! # Architecture
//! ```text
//! ┌──────────────────┐
//! │ InferenceService │  ← Trait (generic interface)
//! └────────┬─────────┘
//!          │
//!    ┌─────┴─────┐
//!    ▼           ▼
//! ┌──────┐  ┌──────────┐
//! │Gemini│  │ Test     │
//! │Client│  │ doubles  │
//! └──────┘  └──────────┘
//! ```

mod client;
mod models;
mod service;

pub use client::GeminiClient;
pub use models::InferenceError;
pub use service::InferenceService;
