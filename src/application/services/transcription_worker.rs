use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::application::ports::{
    JobRepository, RepositoryError, TranscriptionEngine, TranscriptionError, TranscriptionTask,
    UploadStore, UploadStoreError,
};
use crate::domain::{JobId, JobStatus, StoragePath, TransitionError, TranscriptionJob};

/// Consumes dispatched tasks and drives each job to a terminal state.
///
/// Tasks run one at a time, so every engine call is bounded by
/// `engine_timeout`; a call that exceeds it fails the job.
pub struct TranscriptionWorker {
    receiver: mpsc::Receiver<TranscriptionTask>,
    job_repository: Arc<dyn JobRepository>,
    upload_store: Arc<dyn UploadStore>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    engine_timeout: Duration,
}

impl TranscriptionWorker {
    pub fn new(
        receiver: mpsc::Receiver<TranscriptionTask>,
        job_repository: Arc<dyn JobRepository>,
        upload_store: Arc<dyn UploadStore>,
        transcription_engine: Arc<dyn TranscriptionEngine>,
        engine_timeout: Duration,
    ) -> Self {
        Self {
            receiver,
            job_repository,
            upload_store,
            transcription_engine,
            engine_timeout,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Transcription worker started");
        while let Some(task) = self.receiver.recv().await {
            let span = tracing::info_span!(
                "transcription_job",
                job_id = %task.job_id,
                input_file = %task.input_file,
            );

            if let Err(e) = self.process_task(task).instrument(span).await {
                tracing::error!(error = %e, "Transcription job failed");
            }
        }
        tracing::info!("Transcription worker stopped: channel closed");
    }

    async fn process_task(&self, task: TranscriptionTask) -> Result<(), WorkerError> {
        let Some(mut job) = self
            .job_repository
            .find_by_id(task.job_id)
            .await
            .map_err(WorkerError::Repository)?
        else {
            return Err(WorkerError::MissingJob(task.job_id));
        };

        if job.status().is_terminal() {
            tracing::warn!(status = %job.status(), "Job already finished, ignoring redelivered task");
            return Ok(());
        }

        if job.status() == JobStatus::Pending {
            job.start_processing(Utc::now())?;
            self.save(&job).await?;
            tracing::debug!(status = %job.status(), "Job status transition");
        }

        match self.transcribe(&task.input_file).await {
            Ok(text) => self.record_success(job, text).await,
            Err(e) => {
                let mut failed = job;
                failed.fail(e.to_string(), Utc::now())?;
                self.save(&failed).await?;
                Err(e)
            }
        }
    }

    async fn transcribe(&self, input_file: &StoragePath) -> Result<String, WorkerError> {
        let data = self
            .upload_store
            .fetch(input_file)
            .await
            .map_err(WorkerError::Input)?;

        tracing::debug!(bytes = data.len(), "Starting audio transcription");

        tokio::time::timeout(self.engine_timeout, self.transcription_engine.transcribe(&data))
            .await
            .map_err(|_| WorkerError::Timeout(self.engine_timeout))?
            .map_err(WorkerError::Transcription)
    }

    /// A result that cannot be stored is recorded as a failure instead.
    async fn record_success(
        &self,
        processing: TranscriptionJob,
        text: String,
    ) -> Result<(), WorkerError> {
        let chars = text.len();
        let mut completed = processing.clone();
        completed.complete(text, Utc::now())?;

        match self.save(&completed).await {
            Ok(()) => {
                tracing::info!(chars, "Transcription completed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to store transcription result, marking job failed");
                let mut failed = processing;
                failed.fail(format!("failed to store transcription result: {e}"), Utc::now())?;
                self.save(&failed).await
            }
        }
    }

    async fn save(&self, job: &TranscriptionJob) -> Result<(), WorkerError> {
        self.job_repository
            .update(job)
            .await
            .map_err(WorkerError::Repository)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("job record missing: {0}")]
    MissingJob(JobId),
    #[error("input file: {0}")]
    Input(UploadStoreError),
    #[error("transcription: {0}")]
    Transcription(TranscriptionError),
    #[error("transcription timed out after {0:?}")]
    Timeout(Duration),
    #[error("repository: {0}")]
    Repository(RepositoryError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
