use chrono::{DateTime, Utc};

use super::{JobId, JobStatus, StoragePath};

const UNKNOWN_FAILURE: &str = "transcription failed";

/// Lifecycle state of a job. Terminal variants carry their payload so a
/// completed job can never hold an error and a failed job never holds text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Processing,
    Completed { text: String },
    Failed { error: String },
}

impl JobState {
    pub fn status(&self) -> JobStatus {
        match self {
            JobState::Pending => JobStatus::Pending,
            JobState::Processing => JobStatus::Processing,
            JobState::Completed { .. } => JobStatus::Completed,
            JobState::Failed { .. } => JobStatus::Failed,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            JobState::Completed { text } => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            JobState::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Rebuilds a state from flat stored fields.
    pub fn from_parts(
        status: JobStatus,
        text: Option<String>,
        error: Option<String>,
    ) -> Result<Self, String> {
        match (status, text, error) {
            (JobStatus::Pending, None, None) => Ok(JobState::Pending),
            (JobStatus::Processing, None, None) => Ok(JobState::Processing),
            (JobStatus::Completed, Some(text), None) => Ok(JobState::Completed { text }),
            (JobStatus::Failed, None, Some(error)) if !error.is_empty() => {
                Ok(JobState::Failed { error })
            }
            (status, text, error) => Err(format!(
                "inconsistent job record: status={}, text present={}, error present={}",
                status,
                text.is_some(),
                error.is_some()
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid job transition: {from} -> {to}")]
pub struct TransitionError {
    pub from: JobStatus,
    pub to: JobStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionJob {
    id: JobId,
    input_file: StoragePath,
    state: JobState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TranscriptionJob {
    pub fn new(id: JobId, input_file: StoragePath) -> Self {
        let now = Utc::now();
        Self {
            id,
            input_file,
            state: JobState::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reassembles a job read back from the store.
    pub fn restore(
        id: JobId,
        input_file: StoragePath,
        state: JobState,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            input_file,
            state,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn input_file(&self) -> &StoragePath {
        &self.input_file
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    pub fn status(&self) -> JobStatus {
        self.state.status()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn start_processing(&mut self, at: DateTime<Utc>) -> Result<(), TransitionError> {
        self.transition(JobState::Processing, at)
    }

    pub fn complete(
        &mut self,
        text: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.transition(JobState::Completed { text: text.into() }, at)
    }

    pub fn fail(
        &mut self,
        error: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = UNKNOWN_FAILURE.to_string();
        }
        self.transition(JobState::Failed { error }, at)
    }

    fn transition(&mut self, next: JobState, at: DateTime<Utc>) -> Result<(), TransitionError> {
        let from = self.state.status();
        let to = next.status();
        if !from.can_transition_to(to) {
            return Err(TransitionError { from, to });
        }
        self.state = next;
        self.updated_at = at;
        Ok(())
    }
}
