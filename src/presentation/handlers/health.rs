use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub upload_dir: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let upload_dir = state.upload_store.is_available().await;

    match state.job_repository.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                database: "connected".to_string(),
                upload_dir,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed: job store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    database: "error".to_string(),
                    upload_dir,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
