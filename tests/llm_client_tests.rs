use pretty_assertions::assert_eq;
use prompt_enhancer::{
    SubmissionError,
    config::{Config, LlmConfig},
    enhance::{Enhancer, SYSTEM_PROMPT, UserInputs},
    llm::{ChatCompletionRequest, ChatMessage, Credential, LlmClient, OpenAiClient},
};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn create_test_config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        base_url: server.uri(),
        model: "gpt-4o-mini".to_string(),
        ..LlmConfig::default()
    }
}

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 40, "completion_tokens": 10, "total_tokens": 50 }
    })
}

fn simple_request() -> ChatCompletionRequest {
    ChatCompletionRequest {
        messages: vec![ChatMessage::system("sys"), ChatMessage::user("hello")],
        max_tokens: None,
        temperature: None,
    }
}

#[tokio::test]
async fn test_sends_bearer_credential_and_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-user-key"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Clarify: ...")))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(create_test_config(&server)).unwrap();
    let response = client
        .create_chat_completion(&Credential::new("sk-user-key"), simple_request())
        .await
        .unwrap();

    assert_eq!(response.first_content(), Some("Clarify: ..."));
    assert_eq!(response.model, "gpt-4o-mini");
    assert_eq!(response.usage.unwrap().total_tokens, 50);
}

#[tokio::test]
async fn test_credential_is_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-first"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("one")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("two")))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(create_test_config(&server)).unwrap();
    let first = client
        .create_chat_completion(&Credential::new("sk-first"), simple_request())
        .await
        .unwrap();
    let second = client
        .create_chat_completion(&Credential::new("sk-second"), simple_request())
        .await
        .unwrap();

    assert_eq!(first.first_content(), Some("one"));
    assert_eq!(second.first_content(), Some("two"));
}

#[tokio::test]
async fn test_null_content_reads_as_empty() {
    let server = MockServer::start().await;
    let mut body = completion_body("");
    body["choices"][0]["message"]["content"] = Value::Null;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(create_test_config(&server)).unwrap();
    let response = client
        .create_chat_completion(&Credential::new("sk"), simple_request())
        .await
        .unwrap();

    assert_eq!(response.first_content(), Some(""));
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "message": "Rate limit reached for gpt-4o-mini",
                "type": "requests",
                "param": null,
                "code": "rate_limit_exceeded"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(create_test_config(&server)).unwrap();
    let err = client
        .create_chat_completion(&Credential::new("sk"), simple_request())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Rate limit reached"));
}

#[tokio::test]
async fn test_enhancer_end_to_end_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Clarify: ...")))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        llm: create_test_config(&server),
        ..Config::default()
    };
    let enhancer = Enhancer::new(&config).unwrap();
    let inputs = UserInputs::new("You are a tutor", "Student is a beginner", "Explain recursion");

    let output = enhancer
        .submit(&Credential::new("sk-test"), &inputs)
        .await
        .unwrap();
    assert_eq!(output.plain, "Clarify: ...");

    let received = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["messages"][0]["role"], "system");
    assert_eq!(sent["messages"][0]["content"], SYSTEM_PROMPT);
    assert_eq!(sent["messages"][1]["role"], "user");
    assert_eq!(
        sent["messages"][1]["content"],
        "Role:\nYou are a tutor\n\nContext:\nStudent is a beginner\n\nTask:\nExplain recursion"
    );
}

#[tokio::test]
async fn test_enhancer_surfaces_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "param": null,
                "code": "invalid_api_key"
            }
        })))
        .mount(&server)
        .await;

    let config = Config {
        llm: create_test_config(&server),
        ..Config::default()
    };
    let enhancer = Arc::new(Enhancer::new(&config).unwrap());

    let err = enhancer
        .submit(&Credential::new("sk-wrong"), &UserInputs::new("r", "c", "t"))
        .await
        .unwrap_err();

    match err {
        SubmissionError::UpstreamError(message) => {
            assert!(message.contains("Incorrect API key provided"));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_key_is_reported_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        llm: create_test_config(&server),
        ..Config::default()
    };
    let enhancer = Enhancer::new(&config).unwrap();

    let err = enhancer
        .submit(&Credential::new("sk-abc\n"), &UserInputs::new("r", "c", "t"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SubmissionError::UpstreamError("invalid API key format".to_string())
    );
}
