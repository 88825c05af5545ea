use std::sync::Arc;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{JobId, JobStatus, TranscriptionJob};

/// Client-facing projection of a job. Storage locator and timestamps stay internal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobView {
    pub job_id: JobId,
    pub status: JobStatus,
    pub text: Option<String>,
    pub error: Option<String>,
}

impl From<&TranscriptionJob> for JobView {
    fn from(job: &TranscriptionJob) -> Self {
        Self {
            job_id: job.id(),
            status: job.status(),
            text: job.state().text().map(str::to_string),
            error: job.state().error().map(str::to_string),
        }
    }
}

pub struct StatusQueryService {
    job_repository: Arc<dyn JobRepository>,
}

impl StatusQueryService {
    pub fn new(job_repository: Arc<dyn JobRepository>) -> Self {
        Self { job_repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn query(&self, job_id: &str) -> Result<JobView, QueryError> {
        self.job_repository.ping().await.map_err(|e| {
            tracing::error!(error = %e, "Job store unreachable");
            QueryError::StoreUnavailable(e)
        })?;

        // Anything that is not a UUID cannot name a job.
        let Ok(id) = job_id.parse::<JobId>() else {
            return Err(QueryError::NotFound(job_id.to_string()));
        };

        match self.job_repository.find_by_id(id).await {
            Ok(Some(job)) => {
                let view = JobView::from(&job);
                tracing::debug!(status = %view.status, "Job found");
                Ok(view)
            }
            Ok(None) => {
                tracing::warn!("Job not found");
                Err(QueryError::NotFound(job_id.to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch job");
                Err(QueryError::Persistence(e))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("job store unavailable: {0}")]
    StoreUnavailable(RepositoryError),
    #[error("job not found: {0}")]
    NotFound(String),
    #[error("failed to fetch job: {0}")]
    Persistence(RepositoryError),
}
