//! HTTP-level tests for the provider adapters against a mock server.

use murmur_core::{GenerateRequest, GenerateRequestBuilder, Message};
use murmur_error::ProviderErrorKind;
use murmur_interface::TextProvider;
use murmur_models::{AnthropicClient, OllamaClient, OpenAICompatibleClient};
use mockito::Matcher;
use serde_json::json;

fn tweet_request() -> GenerateRequest {
    GenerateRequestBuilder::default()
        .messages(vec![
            Message::system("You write tweets."),
            Message::user("Write a tweet about SQL joins."),
        ])
        .max_tokens(Some(120u32))
        .build()
        .expect("Valid request")
}

#[tokio::test]
async fn test_openai_compatible_returns_first_choice() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 120,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "LEFT JOIN keeps every row."}}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = OpenAICompatibleClient::new(
        "test-key",
        "gpt-4o-mini",
        format!("{}/v1/chat/completions", server.url()),
        "openai",
    )
    .expect("Client builds");

    let text = client.generate(&tweet_request()).await.expect("Generation succeeds");
    assert_eq!(text, "LEFT JOIN keeps every row.");
    assert_eq!(client.provider_name(), "openai");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_compatible_rate_limit_is_typed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(429)
        .with_body("Too Many Requests")
        .create_async()
        .await;

    let client = OpenAICompatibleClient::new("k", "m", format!("{}/chat", server.url()), "groq")
        .expect("Client builds");

    let err = client.generate(&tweet_request()).await.unwrap_err();
    assert!(matches!(err.kind(), ProviderErrorKind::RateLimited(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_openai_compatible_empty_choices_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body(json!({"choices": []}).to_string())
        .create_async()
        .await;

    let client = OpenAICompatibleClient::new("", "local", format!("{}/chat", server.url()), "local")
        .expect("Client builds");

    let err = client.generate(&tweet_request()).await.unwrap_err();
    assert!(matches!(err.kind(), ProviderErrorKind::MalformedResponse(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_openai_compatible_garbage_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = OpenAICompatibleClient::new("k", "m", format!("{}/chat", server.url()), "openai")
        .expect("Client builds");

    let err = client.generate(&tweet_request()).await.unwrap_err();
    assert!(matches!(err.kind(), ProviderErrorKind::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_failure() {
    // Port 9 (discard) is closed on test machines.
    let client = OpenAICompatibleClient::new("k", "m", "http://127.0.0.1:9/chat", "openai")
        .expect("Client builds");

    let err = client.generate(&tweet_request()).await.unwrap_err();
    assert!(matches!(err.kind(), ProviderErrorKind::Transport(_)));
}

#[tokio::test]
async fn test_anthropic_splits_system_prompt_and_joins_text_blocks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "anthropic-key")
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::PartialJson(json!({
            "system": "You write tweets.",
            "messages": [{"role": "user", "content": "Write a tweet about SQL joins."}],
        })))
        .with_status(200)
        .with_body(
            json!({
                "content": [
                    {"type": "text", "text": "Joins "},
                    {"type": "text", "text": "combine tables."}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = AnthropicClient::with_endpoint(
        "anthropic-key",
        "claude-3-5-haiku-latest",
        format!("{}/v1/messages", server.url()),
        30,
    )
    .expect("Client builds");

    let text = client.generate(&tweet_request()).await.expect("Generation succeeds");
    assert_eq!(text, "Joins combine tables.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_anthropic_overloaded_is_unavailable() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/messages")
        .with_status(529)
        .with_body(r#"{"type":"error","error":{"type":"overloaded_error"}}"#)
        .create_async()
        .await;

    let client =
        AnthropicClient::with_endpoint("k", "m", format!("{}/v1/messages", server.url()), 30)
            .expect("Client builds");

    let err = client.generate(&tweet_request()).await.unwrap_err();
    assert!(matches!(err.kind(), ProviderErrorKind::Unavailable(_)));
}

#[tokio::test]
async fn test_ollama_reads_message_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({"model": "llama3", "stream": false})))
        .with_status(200)
        .with_body(
            json!({"message": {"role": "assistant", "content": "EXPLAIN before you optimize."}})
                .to_string(),
        )
        .create_async()
        .await;

    let client = OllamaClient::with_base_url("llama3", format!("{}/", server.url()), 30)
        .expect("Client builds");

    let text = client.generate(&tweet_request()).await.expect("Generation succeeds");
    assert_eq!(text, "EXPLAIN before you optimize.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ollama_server_error_is_retryable() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat")
        .with_status(500)
        .with_body("model crashed")
        .create_async()
        .await;

    let client = OllamaClient::with_base_url("llama3", server.url(), 30).expect("Client builds");

    let err = client.generate(&tweet_request()).await.unwrap_err();
    assert!(err.is_retryable());
}
