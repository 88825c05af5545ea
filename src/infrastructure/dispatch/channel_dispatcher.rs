use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::application::ports::{DispatchError, TaskDispatcher, TranscriptionTask};

/// Dispatches tasks onto a bounded in-process queue consumed by
/// [`TranscriptionWorker`](crate::application::services::TranscriptionWorker).
///
/// Dispatch never waits for queue space: a full queue is reported immediately.
#[derive(Clone)]
pub struct ChannelTaskDispatcher {
    sender: mpsc::Sender<TranscriptionTask>,
}

impl ChannelTaskDispatcher {
    pub fn new(sender: mpsc::Sender<TranscriptionTask>) -> Self {
        Self { sender }
    }

    /// Returns a dispatcher together with the receiving end for the worker.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<TranscriptionTask>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self::new(sender), receiver)
    }
}

#[async_trait]
impl TaskDispatcher for ChannelTaskDispatcher {
    async fn dispatch(&self, task: TranscriptionTask) -> Result<(), DispatchError> {
        let job_id = task.job_id;
        self.sender.try_send(task).map_err(|e| match e {
            TrySendError::Full(_) => DispatchError::QueueFull,
            TrySendError::Closed(_) => DispatchError::WorkerUnavailable,
        })?;
        tracing::debug!(job_id = %job_id, "Transcription task queued");
        Ok(())
    }
}
