use std::time::Duration;

use axum::Router;
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;

use transcription_service::application::ports::{TranscriptionEngine, TranscriptionError};
use transcription_service::infrastructure::audio::OpenAiWhisperEngine;

use super::mock_server::spawn_mock_server;
use crate::helpers::silent_wav;

const TIMEOUT: Duration = Duration::from_secs(10);

async fn echo_form(headers: HeaderMap, mut multipart: Multipart) -> (StatusCode, String) {
    let mut model = String::new();
    let mut file_bytes = 0;
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("model") => model = field.text().await.unwrap(),
            Some("file") => file_bytes = field.bytes().await.unwrap().len(),
            _ => {}
        }
    }
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();
    (
        StatusCode::OK,
        format!("  model={} bytes={} auth={}\n", model, file_bytes, auth),
    )
}

#[tokio::test]
async fn given_successful_response_when_transcribing_then_returns_trimmed_text() {
    let base_url = spawn_mock_server(
        Router::new().route("/v1/audio/transcriptions", post(echo_form)),
    )
    .await;
    let engine = OpenAiWhisperEngine::new(
        Some("sk-test".to_string()),
        Some(format!("{}/v1/", base_url)),
        Some("whisper-large".to_string()),
        TIMEOUT,
    )
    .unwrap();
    let audio = silent_wav(1);

    let text = engine.transcribe(&audio).await.unwrap();

    assert_eq!(
        text,
        format!("model=whisper-large bytes={} auth=Bearer sk-test", audio.len())
    );
}

#[tokio::test]
async fn given_no_api_key_when_transcribing_then_sends_no_authorization() {
    let base_url = spawn_mock_server(
        Router::new().route("/audio/transcriptions", post(echo_form)),
    )
    .await;
    let engine = OpenAiWhisperEngine::new(None, Some(base_url), None, TIMEOUT).unwrap();

    let text = engine.transcribe(&silent_wav(1)).await.unwrap();

    assert!(text.starts_with("model=whisper-1"));
    assert!(text.ends_with("auth=none"));
}

#[tokio::test]
async fn given_error_status_when_transcribing_then_returns_api_request_failed() {
    let base_url = spawn_mock_server(Router::new().route(
        "/audio/transcriptions",
        post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
    ))
    .await;
    let engine =
        OpenAiWhisperEngine::new(Some("sk-bad".to_string()), Some(base_url), None, TIMEOUT)
            .unwrap();

    let result = engine.transcribe(&silent_wav(1)).await;

    match result {
        Err(TranscriptionError::ApiRequestFailed(message)) => {
            assert!(message.contains("401"));
            assert!(message.contains("invalid api key"));
        }
        other => panic!("expected ApiRequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn given_unreachable_server_when_transcribing_then_returns_api_request_failed() {
    let engine = OpenAiWhisperEngine::new(
        None,
        Some("http://127.0.0.1:1".to_string()),
        None,
        TIMEOUT,
    )
    .unwrap();

    let result = engine.transcribe(&silent_wav(1)).await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
}

#[tokio::test]
async fn given_server_slower_than_timeout_when_transcribing_then_returns_timed_out_error() {
    let base_url = spawn_mock_server(Router::new().route(
        "/audio/transcriptions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "too late"
        }),
    ))
    .await;
    let engine =
        OpenAiWhisperEngine::new(None, Some(base_url), None, Duration::from_millis(100)).unwrap();

    let result = engine.transcribe(&silent_wav(1)).await;

    match result {
        Err(TranscriptionError::ApiRequestFailed(message)) => {
            assert!(message.contains("timed out"));
        }
        other => panic!("expected ApiRequestFailed, got {:?}", other),
    }
}
