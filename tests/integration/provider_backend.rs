//! Configured provider backend driving the generation contract against a
//! mock OpenAI-compatible server.

use serde_json::json;
use sparks::config::{GenerationConfig, ProviderConfig, ProviderType};
use sparks::generation::QuestionGenerator;
use sparks::prompt::GenerationRequest;
use sparks::provider::ProviderBackend;
use sparks::{ApiError, ContextField, Difficulty, SocialContext};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn local_provider(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        provider_type: ProviderType::Local,
        model: "sparks-test".to_string(),
        endpoint: Some(format!("{}/v1", server.uri())),
        ..ProviderConfig::default()
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "model": "sparks-test",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_local_provider_generates_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "model": "sparks-test",
            "temperature": 0.5,
            "max_tokens": 300,
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"questions":[{"text":"Favorite snack?","difficulty":"icebreaker"}]}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let options = GenerationConfig {
        temperature: 0.5,
        max_tokens: 300,
    }
    .completion_options();
    let backend = ProviderBackend::from_config(&local_provider(&server), options).unwrap();
    let generator = QuestionGenerator::new(Arc::new(backend));

    let context = SocialContext::new().with(ContextField::Interests, "snacks");
    let batch = generator
        .generate(&GenerationRequest::new(&context))
        .await
        .unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.questions()[0].difficulty, Difficulty::Icebreaker);
}

#[tokio::test]
async fn test_provider_error_status_is_backend_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let backend =
        ProviderBackend::from_config(&local_provider(&server), Default::default()).unwrap();
    let generator = QuestionGenerator::new(Arc::new(backend));
    let context = SocialContext::new().with(ContextField::Vibe, "x");
    let err = generator
        .generate(&GenerationRequest::new(&context))
        .await
        .unwrap_err();
    assert!(err.is_backend_failure(), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_prose_reply_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("Sure! Here are some questions.")),
        )
        .mount(&server)
        .await;

    let backend =
        ProviderBackend::from_config(&local_provider(&server), Default::default()).unwrap();
    let generator = QuestionGenerator::new(Arc::new(backend));
    let context = SocialContext::new().with(ContextField::Vibe, "x");
    let err = generator
        .generate(&GenerationRequest::new(&context))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[test]
fn test_missing_api_key_is_not_configured() {
    let provider = ProviderConfig {
        provider_type: ProviderType::OpenAI,
        api_key_env: Some("SPARKS_INTEGRATION_UNSET_KEY".to_string()),
        ..ProviderConfig::default()
    };
    let result = ProviderBackend::from_config(&provider, Default::default());
    assert!(matches!(result, Err(ApiError::ProviderNotConfigured(_))));
}
