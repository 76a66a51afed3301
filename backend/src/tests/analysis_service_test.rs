use std::sync::Arc;

use crate::config::AnalysisConfig;
use serde_json::json;

use crate::models::AnalysisRequest;
use crate::services::analysis::{AnalysisError, AnalysisService, risk_response_schema};
use crate::services::llm::InferenceError;
use crate::tests::common::{MockInferenceService, sample_result_json};

fn service_with(mock: &Arc<MockInferenceService>) -> AnalysisService {
    AnalysisService::new(mock.clone(), &AnalysisConfig::default())
}

#[tokio::test]
async fn test_missing_text_skips_inference() {
    let mock = MockInferenceService::replying(sample_result_json().to_string());
    let service = service_with(&mock);

    let absent = AnalysisRequest { text: None, lang: Some("uz".to_string()) };
    let empty = AnalysisRequest::new("", "ru");

    assert!(matches!(service.analyze(&absent).await, Err(AnalysisError::MissingInput)));
    assert!(matches!(service.analyze(&empty).await, Err(AnalysisError::MissingInput)));
    assert_eq!(mock.call_count(), 0, "Model must not be called without text");
}

#[tokio::test]
async fn test_long_text_is_truncated() {
    let mock = MockInferenceService::replying(sample_result_json().to_string());
    let service = service_with(&mock);

    let text = format!("{}TAIL_MARKER", "x".repeat(38_000));
    service.analyze(&AnalysisRequest::new(text, "en")).await.unwrap();

    let prompt = mock.last_prompt();
    assert!(prompt.contains(&"x".repeat(38_000)));
    assert!(!prompt.contains(&"x".repeat(38_001)));
    assert!(!prompt.contains("TAIL_MARKER"));
}

#[tokio::test]
async fn test_truncation_counts_characters() {
    let mock = MockInferenceService::replying(sample_result_json().to_string());
    let service = service_with(&mock);

    service
        .analyze(&AnalysisRequest::new("ж".repeat(38_005), "ru"))
        .await
        .unwrap();

    assert_eq!(mock.last_prompt().matches('ж').count(), 38_000);
}

#[tokio::test]
async fn test_short_text_is_sent_whole() {
    let mock = MockInferenceService::replying(sample_result_json().to_string());
    let service = service_with(&mock);

    let text = "1. The buyer pays a penalty of 50% for any delay.";
    service.analyze(&AnalysisRequest::new(text, "uz")).await.unwrap();
    assert!(mock.last_prompt().contains(text));
}

#[tokio::test]
async fn test_custom_text_limit() {
    let mock = MockInferenceService::replying(sample_result_json().to_string());
    let config = AnalysisConfig { max_text_chars: 5, ..AnalysisConfig::default() };
    let service = AnalysisService::new(mock.clone(), &config);

    service.analyze(&AnalysisRequest::new("abcdefgh", "en")).await.unwrap();
    let prompt = mock.last_prompt();
    assert!(prompt.contains("abcde"));
    assert!(!prompt.contains("abcdef"));
}

#[tokio::test]
async fn test_prompt_language_follows_lang() {
    let cases = [
        (Some("uz"), "Uzbek"),
        (Some("ru"), "Russian"),
        (Some("en"), "English"),
        (Some("de"), "English"),
        (None, "English"),
    ];

    for (lang, label) in cases {
        let mock = MockInferenceService::replying(sample_result_json().to_string());
        let service = service_with(&mock);
        let req = AnalysisRequest {
            text: Some("Contract text".to_string()),
            lang: lang.map(str::to_string),
        };

        service.analyze(&req).await.unwrap();
        let prompt = mock.last_prompt();
        assert!(
            prompt.contains(&format!("in the {} language", label)),
            "lang {:?} should request {}",
            lang,
            label
        );
    }
}

#[tokio::test]
async fn test_schema_is_declared_once_per_request() {
    let mock = MockInferenceService::replying(sample_result_json().to_string());
    let service = service_with(&mock);

    service.analyze(&AnalysisRequest::new("text", "en")).await.unwrap();

    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.last_schema(), risk_response_schema());
}

#[tokio::test]
async fn test_valid_reply_is_returned_unchanged() {
    let mock = MockInferenceService::replying(sample_result_json().to_string());
    let service = service_with(&mock);

    let result = service.analyze(&AnalysisRequest::new("text", "en")).await.unwrap();

    assert_eq!(result, sample_result_json());
    assert_eq!(serde_json::to_value(&result).unwrap(), sample_result_json());
}

#[tokio::test]
async fn test_inconsistent_fields_are_not_validated() {
    let reply = r#"{"hasRisks":true,"risks":[],"summary":"nothing found"}"#;
    let mock = MockInferenceService::replying(reply);
    let service = service_with(&mock);

    let result = service.analyze(&AnalysisRequest::new("text", "en")).await.unwrap();
    assert_eq!(result["hasRisks"], true);
    assert_eq!(result["risks"], json!([]));
}

#[tokio::test]
async fn test_malformed_reply_is_parse_error() {
    let mock = MockInferenceService::replying("Here is your analysis: {not json");
    let service = service_with(&mock);

    let err = service.analyze(&AnalysisRequest::new("text", "en")).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Parse(_)));
}

#[tokio::test]
async fn test_reply_outside_schema_is_relayed_verbatim() {
    let replies = [
        json!({"hasRisks": false, "risks": [], "summary": "ok", "riskScore": 3}),
        json!({"hasRisks": true, "risks": [{"clause": "c", "level": "critical", "explanation": "e"}], "summary": "s"}),
        json!({"hasRisks": false, "risks": []}),
    ];

    for reply in replies {
        let mock = MockInferenceService::replying(reply.to_string());
        let service = service_with(&mock);

        let result = service.analyze(&AnalysisRequest::new("text", "en")).await.unwrap();
        assert_eq!(result, reply);
    }
}

#[tokio::test]
async fn test_inference_failure_is_propagated() {
    let mock = MockInferenceService::failing("model overloaded");
    let service = service_with(&mock);

    let err = service.analyze(&AnalysisRequest::new("text", "en")).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Inference(InferenceError::Upstream(_))));
    assert_eq!(mock.call_count(), 1, "No retry on failure");
}
