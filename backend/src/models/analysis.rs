use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Incoming body of `POST /api/analyze`.
///
/// Both fields are optional at the wire level so that an absent `text`
/// surfaces as a missing-input error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Non-string values are treated as absent
    #[serde(default, deserialize_with = "deserialize_lenient_tag")]
    pub lang: Option<String>,
}

// Any JSON value is accepted; only strings carry a tag
fn deserialize_lenient_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self { text: Some(text.into()), lang: Some(lang.into()) }
    }

    /// Document text, if present and non-empty.
    pub fn document_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn response_language(&self) -> ResponseLanguage {
        ResponseLanguage::from_tag(self.lang.as_deref())
    }
}

/// Language the model is asked to write its analysis in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseLanguage {
    Uzbek,
    Russian,
    English,
}

impl ResponseLanguage {
    /// `"uz"` and `"ru"` select their languages; anything else is English.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("uz") => Self::Uzbek,
            Some("ru") => Self::Russian,
            _ => Self::English,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Uzbek => "Uzbek",
            Self::Russian => "Russian",
            Self::English => "English",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// One flagged clause of the analysed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskItem {
    /// Quoted text of the risky clause
    pub clause: String,
    pub level: RiskLevel,
    /// Why the clause is risky for the reader
    pub explanation: String,
}

/// Structured risk assessment returned by the model and relayed as-is.
///
/// `has_risks` and `risks` are not cross-checked; the model is trusted to
/// keep them consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub has_risks: bool,
    pub risks: Vec<RiskItem>,
    pub summary: String,
}
