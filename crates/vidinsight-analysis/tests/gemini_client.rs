//! Dispatcher tests against a mock Gemini HTTP server.

use std::sync::Arc;

use serde_json::json;
use vidinsight_analysis::wire::{GenerateContentRequest, Part};
use vidinsight_analysis::{
    Credentials, Dispatcher, GeminiClient, Normalizer, RawFile, MISSING_CREDENTIALS_REASON,
};
use vidinsight_models::{AnalysisMode, AnalysisOutcome, DirectiveTable, VideoInput};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";
const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

fn dispatcher_for(server_uri: &str) -> Dispatcher {
    let client = GeminiClient::new(server_uri).unwrap();
    Dispatcher::new(
        Arc::new(client),
        Arc::new(DirectiveTable::builtin()),
        MODEL,
    )
}

async fn file_input() -> VideoInput {
    let raw = RawFile::from_bytes("lecture.mp4", "video/mp4", vec![0, 1, 2, 3, 4, 5]);
    Normalizer::default().normalize_file(raw).await.unwrap().into()
}

fn youtube_input() -> VideoInput {
    Normalizer::default()
        .normalize_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        .unwrap()
        .into()
}

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    }))
}

async fn sent_request(server: &MockServer) -> GenerateContentRequest {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    serde_json::from_slice(&requests[0].body).unwrap()
}

#[tokio::test]
async fn test_file_video_is_sent_inline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(text_response("## Summary\n- first point"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = dispatcher_for(&server.uri())
        .dispatch(
            &file_input().await,
            AnalysisMode::Summary,
            &Credentials::new("test-key"),
        )
        .await;

    assert_eq!(
        outcome,
        AnalysisOutcome::Success {
            markdown: "## Summary\n- first point".to_string()
        }
    );

    let request = sent_request(&server).await;
    assert!(request.tools.is_empty());
    let parts = &request.contents[0].parts;
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], Part::inline_data("video/mp4", "AAECAwQF"));
}

#[tokio::test]
async fn test_youtube_video_enables_search() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "### Quiz\n1. ..."}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://example.com/transcript", "title": "example.com"}}
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = dispatcher_for(&server.uri())
        .dispatch(&youtube_input(), AnalysisMode::Quiz, &Credentials::new("test-key"))
        .await;

    assert_eq!(outcome.markdown(), Some("### Quiz\n1. ..."));

    let request = sent_request(&server).await;
    assert!(request.uses_google_search());
    let parts = &request.contents[0].parts;
    assert_eq!(parts.len(), 1);
    assert!(matches!(&parts[0], Part::Text(text) if text.contains("watch?v=dQw4w9WgXcQ")));
}

#[tokio::test]
async fn test_missing_credentials_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(text_response("unreachable"))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = dispatcher_for(&server.uri())
        .dispatch(&youtube_input(), AnalysisMode::Summary, &Credentials::missing())
        .await;

    assert_eq!(outcome.reason(), Some(MISSING_CREDENTIALS_REASON));
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = dispatcher_for(&server.uri())
        .dispatch(&file_input().await, AnalysisMode::Quiz, &Credentials::new("bad-key"))
        .await;

    assert_eq!(
        outcome.reason(),
        Some("API key not valid. Please pass a valid API key.")
    );
}

#[tokio::test]
async fn test_plain_text_error_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded\n"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = dispatcher_for(&server.uri())
        .dispatch(&youtube_input(), AnalysisMode::KeyLessons, &Credentials::new("k"))
        .await;

    assert_eq!(outcome.reason(), Some("upstream overloaded"));
}

#[tokio::test]
async fn test_empty_error_body_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = dispatcher_for(&server.uri())
        .dispatch(&youtube_input(), AnalysisMode::Summary, &Credentials::new("k"))
        .await;

    assert_eq!(outcome.reason(), Some("Gemini API returned 500"));
}

#[tokio::test]
async fn test_undecodable_body_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = dispatcher_for(&server.uri())
        .dispatch(&file_input().await, AnalysisMode::Summary, &Credentials::new("k"))
        .await;

    assert!(!outcome.is_success());
    assert!(!outcome.reason().unwrap().trim().is_empty());
}

#[tokio::test]
async fn test_empty_candidates_yield_fallback_markdown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = dispatcher_for(&server.uri())
        .dispatch(&file_input().await, AnalysisMode::Summary, &Credentials::new("k"))
        .await;

    assert_eq!(
        outcome.markdown(),
        Some(vidinsight_models::EMPTY_RESULT_MARKDOWN)
    );
}

#[tokio::test]
async fn test_unreachable_service_is_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let outcome = dispatcher_for(&uri)
        .dispatch(&youtube_input(), AnalysisMode::Summary, &Credentials::new("k"))
        .await;

    assert!(!outcome.is_success());
    assert!(!outcome.reason().unwrap().is_empty());
}
