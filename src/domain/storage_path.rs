use std::fmt;

use super::{JobId, UploadFileName};

/// Locator of an uploaded file inside the upload store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    /// The job id prefix keeps paths unique even when clients reuse file names.
    pub fn new(job_id: &JobId, file_name: &UploadFileName) -> Self {
        Self(format!("{}_{}", job_id, file_name.as_str()))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
