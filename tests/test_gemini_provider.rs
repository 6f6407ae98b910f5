//! Integration tests for the Gemini provider against a mock HTTP server

use agentline::llm::provider::{
    CompletionRequest, FinishReason, LlmError, LlmProvider, Message,
};
use agentline::llm::providers::{GeminiConfig, GeminiProvider};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(GeminiConfig {
        api_key: "test-key".to_string(),
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    })
    .expect("provider should build")
}

fn success_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": text}]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 10,
            "candidatesTokenCount": 5,
            "totalTokenCount": 15
        }
    })
}

#[tokio::test]
async fn test_complete_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("PASSED")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = CompletionRequest::from_prompts("gemini-2.0-flash", None, "check this work");

    let response = provider.complete(request).await.unwrap();

    assert_eq!(response.content, "PASSED");
    assert_eq!(response.finish_reason, FinishReason::Stop);
    assert_eq!(response.usage.total_tokens, 15);
}

#[tokio::test]
async fn test_system_prompt_sent_as_system_instruction() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(body_partial_json(serde_json::json!({
            "systemInstruction": {"parts": [{"text": "You are a planner."}]},
            "contents": [{"role": "user", "parts": [{"text": "plan it"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = CompletionRequest::from_prompts(
        "gemini-2.0-flash",
        Some("You are a planner."),
        "plan it",
    );

    provider.complete(request).await.unwrap();
}

#[tokio::test]
async fn test_generation_config_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": {"temperature": 0.2, "maxOutputTokens": 512}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = CompletionRequest {
        messages: vec![Message::user("go")],
        model: "gemini-2.0-flash".to_string(),
        temperature: Some(0.2),
        max_tokens: Some(512),
    };

    provider.complete(request).await.unwrap();
}

#[tokio::test]
async fn test_server_error_surfaces_as_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = CompletionRequest::from_prompts("gemini-2.0-flash", None, "go");

    let error = provider.complete(request).await.unwrap_err();
    assert!(matches!(error, LlmError::RequestFailed(_)));
}

#[tokio::test]
async fn test_rate_limit_surfaces_as_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = CompletionRequest::from_prompts("gemini-2.0-flash", None, "go");

    let error = provider.complete(request).await.unwrap_err();
    assert!(matches!(error, LlmError::RateLimited(_)));
}

#[tokio::test]
async fn test_empty_candidates_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = CompletionRequest::from_prompts("gemini-2.0-flash", None, "go");

    let error = provider.complete(request).await.unwrap_err();
    assert!(matches!(error, LlmError::InvalidResponse(_)));
}
