mod job;
mod job_id;
mod job_status;
mod storage_path;
mod upload_file_name;

pub use job::{JobState, TranscriptionJob, TransitionError};
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use storage_path::StoragePath;
pub use upload_file_name::{ACCEPTED_EXTENSION, UploadFileName, UploadFileNameError};
