mod status_query_service;
mod submission_service;
mod transcription_worker;
mod upload_receiver;

pub use status_query_service::{JobView, QueryError, StatusQueryService};
pub use submission_service::{SubmissionError, SubmissionService, SubmittedJob};
pub use transcription_worker::{TranscriptionWorker, WorkerError};
pub use upload_receiver::{ReceivedUpload, UploadError, UploadReceiver};
