use async_trait::async_trait;

use crate::domain::{JobId, TranscriptionJob};

use super::RepositoryError;

/// Durable store of transcription jobs, keyed by job id.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn insert(&self, job: &TranscriptionJob) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: JobId) -> Result<Option<TranscriptionJob>, RepositoryError>;

    /// Overwrites the mutable fields (state and `updated_at`) of an existing job.
    async fn update(&self, job: &TranscriptionJob) -> Result<(), RepositoryError>;

    /// Liveness probe.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
