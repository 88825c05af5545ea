use std::sync::Arc;

use crate::application::ports::{
    DispatchError, JobRepository, RepositoryError, TaskDispatcher, TranscriptionTask,
};
use crate::domain::{JobId, JobStatus, StoragePath, TranscriptionJob};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedJob {
    pub job_id: JobId,
    pub status: JobStatus,
}

/// Records a new job and hands it to the dispatcher.
///
/// The two steps are not atomic. If the insert fails nothing was promised to
/// the client and the upload is left as an orphan file. If dispatch fails the
/// record stays `pending` with no worker assigned; the error is reported and
/// the record is left untouched, since only the worker mutates jobs.
pub struct SubmissionService {
    job_repository: Arc<dyn JobRepository>,
    dispatcher: Arc<dyn TaskDispatcher>,
}

impl SubmissionService {
    pub fn new(job_repository: Arc<dyn JobRepository>, dispatcher: Arc<dyn TaskDispatcher>) -> Self {
        Self {
            job_repository,
            dispatcher,
        }
    }

    #[tracing::instrument(
        skip(self, stored_path, job_id),
        fields(job_id = %job_id, input_file = %stored_path)
    )]
    pub async fn submit(
        &self,
        stored_path: StoragePath,
        job_id: JobId,
    ) -> Result<SubmittedJob, SubmissionError> {
        let job = TranscriptionJob::new(job_id, stored_path.clone());

        self.job_repository.insert(&job).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to store job record");
            SubmissionError::Persistence(e)
        })?;
        tracing::debug!("Job record stored");

        let task = TranscriptionTask {
            job_id,
            input_file: stored_path,
        };

        self.dispatcher.dispatch(task).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to dispatch transcription task, job left pending");
            SubmissionError::Dispatch(e)
        })?;

        tracing::info!("Transcription job submitted");

        Ok(SubmittedJob {
            job_id,
            status: job.status(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("failed to store job: {0}")]
    Persistence(RepositoryError),
    #[error("failed to start transcription job: {0}")]
    Dispatch(DispatchError),
}
