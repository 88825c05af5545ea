use std::io;

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::presentation::handlers::ApiError;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub job_id: String,
    pub status: String,
}

/// Accepts the first multipart field as the audio file, stores it and submits
/// a transcription job for it.
#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            return Err(ApiError::BadRequest("No file uploaded".to_string()));
        }
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(ApiError::PayloadTooLarge(e.body_text()));
        }
        Err(e) => {
            return Err(ApiError::BadRequest(format!(
                "Failed to read multipart: {}",
                e
            )));
        }
    };

    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    tracing::info!(filename = %filename, content_type = %content_type, "Received upload");

    let stream = field.map_err(multipart_to_io).boxed();

    let upload = state.upload_receiver.receive(&filename, stream).await?;

    let submitted = state
        .submission_service
        .submit(upload.stored_path, upload.job_id)
        .await?;

    Ok(Json(TranscribeResponse {
        job_id: submitted.job_id.to_string(),
        status: submitted.status.as_str().to_string(),
    }))
}

fn multipart_to_io(e: MultipartError) -> io::Error {
    let kind = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        io::ErrorKind::FileTooLarge
    } else {
        io::ErrorKind::Other
    };
    io::Error::new(kind, e.body_text())
}
