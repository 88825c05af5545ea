use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{JobId, JobState, JobStatus, StoragePath, TranscriptionJob};

/// Jobs persisted one row per job in the `transcripts` table.
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TranscriptRow {
    job_id: Uuid,
    status: String,
    input_file: String,
    text: Option<String>,
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TranscriptRow> for TranscriptionJob {
    type Error = RepositoryError;

    fn try_from(row: TranscriptRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<JobStatus>()
            .map_err(RepositoryError::CorruptRecord)?;
        let state = JobState::from_parts(status, row.text, row.error)
            .map_err(RepositoryError::CorruptRecord)?;

        Ok(TranscriptionJob::restore(
            JobId::from_uuid(row.job_id),
            StoragePath::from_raw(row.input_file),
            state,
            row.created_at,
            row.updated_at,
        ))
    }
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_check_violation() => {
            RepositoryError::ConstraintViolation(db.to_string())
        }
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            RepositoryError::ConnectionFailed(e.to_string())
        }
        other => RepositoryError::QueryFailed(other.to_string()),
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id()))]
    async fn insert(&self, job: &TranscriptionJob) -> Result<(), RepositoryError> {
        let state = job.state();

        sqlx::query(
            r#"
            INSERT INTO transcripts (job_id, status, input_file, text, error, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(job.id().as_uuid())
        .bind(job.status().as_str())
        .bind(job.input_file().as_str())
        .bind(state.text())
        .bind(state.error())
        .bind(job.created_at())
        .bind(job.updated_at())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn find_by_id(&self, id: JobId) -> Result<Option<TranscriptionJob>, RepositoryError> {
        let row = sqlx::query_as::<_, TranscriptRow>(
            r#"
            SELECT job_id, status, input_file, text, error, created_at, updated_at
            FROM transcripts
            WHERE job_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(TranscriptionJob::try_from).transpose()
    }

    #[instrument(skip(self, job), fields(job_id = %job.id(), status = %job.status()))]
    async fn update(&self, job: &TranscriptionJob) -> Result<(), RepositoryError> {
        let state = job.state();

        let result = sqlx::query(
            r#"
            UPDATE transcripts
            SET status = $1, text = $2, error = $3, updated_at = $4
            WHERE job_id = $5
            "#,
        )
        .bind(job.status().as_str())
        .bind(state.text())
        .bind(state.error())
        .bind(job.updated_at())
        .bind(job.id().as_uuid())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(job.id().to_string()));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}
