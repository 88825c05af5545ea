use std::sync::Arc;

use chrono::Utc;

use transcription_service::application::ports::JobRepository;
use transcription_service::application::services::{QueryError, StatusQueryService};
use transcription_service::domain::{JobId, JobStatus, StoragePath, TranscriptionJob};
use transcription_service::infrastructure::persistence::InMemoryJobRepository;

async fn store_job(repository: &InMemoryJobRepository) -> TranscriptionJob {
    let job = TranscriptionJob::new(JobId::new(), StoragePath::from_raw("x_sample.wav"));
    repository.insert(&job).await.unwrap();
    job
}

#[tokio::test]
async fn given_pending_job_when_querying_then_view_has_no_text_or_error() {
    let repository = Arc::new(InMemoryJobRepository::new());
    let job = store_job(&repository).await;
    let service = StatusQueryService::new(repository);

    let view = service.query(&job.id().to_string()).await.unwrap();

    assert_eq!(view.job_id, job.id());
    assert_eq!(view.status, JobStatus::Pending);
    assert_eq!(view.text, None);
    assert_eq!(view.error, None);
}

#[tokio::test]
async fn given_completed_job_when_querying_repeatedly_then_views_are_identical() {
    let repository = Arc::new(InMemoryJobRepository::new());
    let mut job = store_job(&repository).await;
    job.complete("hello world", Utc::now()).unwrap();
    repository.update(&job).await.unwrap();
    let service = StatusQueryService::new(repository);

    let first = service.query(&job.id().to_string()).await.unwrap();
    let second = service.query(&job.id().to_string()).await.unwrap();

    assert_eq!(first.status, JobStatus::Completed);
    assert_eq!(first.text.as_deref(), Some("hello world"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn given_failed_job_when_querying_then_error_is_present_and_text_absent() {
    let repository = Arc::new(InMemoryJobRepository::new());
    let mut job = store_job(&repository).await;
    job.fail("engine crashed", Utc::now()).unwrap();
    repository.update(&job).await.unwrap();
    let service = StatusQueryService::new(repository);

    let view = service.query(&job.id().to_string()).await.unwrap();

    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.text, None);
    assert_eq!(view.error.as_deref(), Some("engine crashed"));
}

#[tokio::test]
async fn given_unknown_job_id_when_querying_then_not_found() {
    let service = StatusQueryService::new(Arc::new(InMemoryJobRepository::new()));

    let result = service.query(&JobId::new().to_string()).await;

    assert!(matches!(result, Err(QueryError::NotFound(_))));
}

#[tokio::test]
async fn given_malformed_job_id_when_querying_then_not_found() {
    let service = StatusQueryService::new(Arc::new(InMemoryJobRepository::new()));

    let result = service.query("not-a-job").await;

    assert!(matches!(result, Err(QueryError::NotFound(_))));
}

#[tokio::test]
async fn given_store_outage_when_querying_then_store_unavailable_not_not_found() {
    let repository = Arc::new(InMemoryJobRepository::new());
    let job = store_job(&repository).await;
    repository.set_available(false);
    let service = StatusQueryService::new(repository);

    let result = service.query(&job.id().to_string()).await;

    assert!(matches!(result, Err(QueryError::StoreUnavailable(_))));
}
