mod job_repository;
mod repository_error;
mod task_dispatcher;
mod transcription_engine;
mod upload_store;

pub use job_repository::JobRepository;
pub use repository_error::RepositoryError;
pub use task_dispatcher::{DispatchError, TaskDispatcher, TranscriptionTask};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use upload_store::{UploadStore, UploadStoreError};
