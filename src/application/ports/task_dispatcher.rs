use async_trait::async_trait;

use crate::domain::{JobId, StoragePath};

/// Work item handed to the transcription worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionTask {
    pub job_id: JobId,
    pub input_file: StoragePath,
}

/// Fire-and-forget submission of transcription tasks. A successful dispatch
/// only means the task was accepted, not that a worker started on it.
#[async_trait]
pub trait TaskDispatcher: Send + Sync {
    async fn dispatch(&self, task: TranscriptionTask) -> Result<(), DispatchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("task queue is full")]
    QueueFull,
    #[error("no worker is consuming the task queue")]
    WorkerUnavailable,
}
