use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};

use crate::application::ports::TranscriptionError;

pub(super) fn build_client(timeout: Duration) -> Result<Client, TranscriptionError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TranscriptionError::Configuration(format!("http client: {}", e)))
}

/// Multipart body shared by every Whisper-style transcription endpoint.
pub(super) fn audio_form(
    audio_data: &[u8],
    model: &str,
    response_format: &'static str,
) -> Result<Form, TranscriptionError> {
    let file_part = Part::bytes(audio_data.to_vec())
        .file_name("audio.wav")
        .mime_str("audio/wav")
        .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

    Ok(Form::new()
        .text("model", model.to_string())
        .text("response_format", response_format)
        .part("file", file_part))
}

/// Sends the request and turns transport failures, timeouts and non-2xx
/// statuses into `ApiRequestFailed`.
pub(super) async fn send(request: RequestBuilder) -> Result<Response, TranscriptionError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            TranscriptionError::ApiRequestFailed(format!("request timed out: {}", e))
        } else {
            TranscriptionError::ApiRequestFailed(format!("request: {}", e))
        }
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(TranscriptionError::ApiRequestFailed(format!(
        "status {}: {}",
        status, body
    )))
}
