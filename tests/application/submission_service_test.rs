use std::sync::Arc;

use transcription_service::application::ports::{JobRepository, TranscriptionTask};
use transcription_service::application::services::{SubmissionError, SubmissionService};
use transcription_service::domain::{JobId, JobStatus, StoragePath};
use transcription_service::infrastructure::persistence::InMemoryJobRepository;

use crate::helpers::{FailingDispatcher, RecordingDispatcher};

#[tokio::test]
async fn given_healthy_store_and_dispatcher_when_submitting_then_job_is_pending_and_dispatched() {
    let repository = Arc::new(InMemoryJobRepository::new());
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let service = SubmissionService::new(repository.clone(), dispatcher.clone());
    let job_id = JobId::new();
    let path = StoragePath::from_raw(format!("{}_sample.wav", job_id));

    let submitted = service.submit(path.clone(), job_id).await.unwrap();

    assert_eq!(submitted.job_id, job_id);
    assert_eq!(submitted.status, JobStatus::Pending);

    let stored = repository.find_by_id(job_id).await.unwrap().unwrap();
    assert_eq!(stored.status(), JobStatus::Pending);
    assert_eq!(stored.input_file(), &path);

    assert_eq!(
        dispatcher.tasks(),
        vec![TranscriptionTask {
            job_id,
            input_file: path,
        }]
    );
}

#[tokio::test]
async fn given_store_outage_when_submitting_then_persistence_error_and_nothing_dispatched() {
    let repository = Arc::new(InMemoryJobRepository::new());
    repository.set_available(false);
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let service = SubmissionService::new(repository.clone(), dispatcher.clone());

    let result = service
        .submit(StoragePath::from_raw("x_sample.wav"), JobId::new())
        .await;

    assert!(matches!(result, Err(SubmissionError::Persistence(_))));
    assert!(dispatcher.tasks().is_empty());
    repository.set_available(true);
    assert!(repository.is_empty());
}

#[tokio::test]
async fn given_dispatch_failure_when_submitting_then_dispatch_error_and_record_stays_pending() {
    let repository = Arc::new(InMemoryJobRepository::new());
    let service = SubmissionService::new(repository.clone(), Arc::new(FailingDispatcher));
    let job_id = JobId::new();

    let result = service
        .submit(StoragePath::from_raw("x_sample.wav"), job_id)
        .await;

    assert!(matches!(result, Err(SubmissionError::Dispatch(_))));
    let stored = repository.find_by_id(job_id).await.unwrap().unwrap();
    assert_eq!(stored.status(), JobStatus::Pending);
}

#[tokio::test]
async fn given_already_used_job_id_when_submitting_then_persistence_error() {
    let repository = Arc::new(InMemoryJobRepository::new());
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let service = SubmissionService::new(repository.clone(), dispatcher.clone());
    let job_id = JobId::new();

    service
        .submit(StoragePath::from_raw("a.wav"), job_id)
        .await
        .unwrap();
    let result = service.submit(StoragePath::from_raw("b.wav"), job_id).await;

    assert!(matches!(result, Err(SubmissionError::Persistence(_))));
    assert_eq!(dispatcher.tasks().len(), 1);
    assert_eq!(repository.len(), 1);
}
