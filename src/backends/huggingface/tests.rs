use mockito::Matcher;
use secrecy::SecretString;
use serde_json::json;

use super::*;
use crate::chat::ChatMessage;

const MODEL: &str = "test-org/test-model";
const ROUTE: &str = "/models/test-org/test-model/v1/chat/completions";

fn client_for(server: &mockito::ServerGuard) -> HuggingFace {
    HuggingFace::with_config(
        SecretString::new("hf-test".to_string()),
        Some(MODEL.to_string()),
        Some(server.url()),
        None,
        Some(5),
    )
    .expect("client")
}

fn history() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system().content("be brief").build(),
        ChatMessage::user().content("what is the time").build(),
    ]
}

#[test]
fn endpoint_embeds_model_and_trims_slash() {
    let client = HuggingFace::with_client(
        Client::new(),
        SecretString::new("k".to_string()),
        Some("a/b".to_string()),
        Some("https://example.test/".to_string()),
        None,
        None,
    );
    assert_eq!(
        client.endpoint(),
        "https://example.test/models/a/b/v1/chat/completions"
    );
    assert_eq!(client.max_tokens(), DEFAULT_MAX_TOKENS);
}

#[test]
fn defaults_point_at_public_endpoint() {
    let client = HuggingFace::with_client(
        Client::new(),
        SecretString::new("k".to_string()),
        None,
        None,
        None,
        None,
    );
    assert_eq!(client.model(), DEFAULT_MODEL);
    assert!(client.endpoint().starts_with(DEFAULT_BASE_URL));
}

#[tokio::test]
async fn sends_full_history_with_fixed_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ROUTE)
        .match_header("authorization", "Bearer hf-test")
        .match_body(Matcher::Json(json!({
            "model": MODEL,
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "what is the time"}
            ],
            "max_tokens": 500,
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"It's 3 PM."}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let response = client_for(&server).chat(&history()).await.expect("chat");
    assert_eq!(response.text().as_deref(), Some("It's 3 PM."));
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ROUTE)
        .with_status(401)
        .with_body("invalid token")
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server).chat(&history()).await.unwrap_err();
    match err {
        LLMError::ApiError { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid token");
        }
        other => panic!("unexpected error: {other}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_choices_yield_no_text() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ROUTE)
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let response = client_for(&server).chat(&history()).await.expect("chat");
    assert_eq!(response.text(), None);
}

#[tokio::test]
async fn missing_choices_field_counts_as_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ROUTE)
        .with_status(200)
        .with_body(r#"{"id":"x"}"#)
        .create_async()
        .await;

    let response = client_for(&server).chat(&history()).await.expect("chat");
    assert_eq!(response.text(), None);
}

#[tokio::test]
async fn malformed_body_is_a_format_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ROUTE)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = client_for(&server).chat(&history()).await.unwrap_err();
    assert!(matches!(err, LLMError::ResponseFormatError { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HuggingFace::with_config(
        SecretString::new("hf-test".to_string()),
        Some(MODEL.to_string()),
        Some(format!("http://{addr}")),
        None,
        Some(5),
    )
    .expect("client");

    let err = client.chat(&history()).await.unwrap_err();
    assert!(matches!(err, LLMError::HttpError(_)));
    assert!(err.is_retryable());
}
