use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use crate::application::services::JobView;
use crate::presentation::handlers::ApiError;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranscriptResponse {
    pub job_id: String,
    pub status: String,
    pub text: Option<String>,
    pub error: Option<String>,
}

impl From<JobView> for TranscriptResponse {
    fn from(view: JobView) -> Self {
        Self {
            job_id: view.job_id.to_string(),
            status: view.status.as_str().to_string(),
            text: view.text,
            error: view.error,
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn transcript_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let view = state.status_query_service.query(&job_id).await?;
    Ok(Json(TranscriptResponse::from(view)))
}
