//! Response schema declared to the model
//!
//! Gemini accepts an OpenAPI subset with upper-case type names.

use serde_json::{Value, json};

use crate::models::RiskLevel;

pub fn risk_response_schema() -> Value {
    let levels: Vec<&str> = RiskLevel::ALL.iter().map(RiskLevel::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "hasRisks": { "type": "BOOLEAN" },
            "risks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "clause": {
                            "type": "STRING",
                            "description": "Text of the clause found to be risky"
                        },
                        "level": { "type": "STRING", "enum": levels },
                        "explanation": {
                            "type": "STRING",
                            "description": "Explanation of why the clause is risky"
                        }
                    },
                    "required": ["clause", "level", "explanation"]
                }
            },
            "summary": {
                "type": "STRING",
                "description": "Short overall conclusion about the document"
            }
        },
        "required": ["hasRisks", "risks", "summary"]
    })
}
