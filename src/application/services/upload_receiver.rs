use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::application::ports::{UploadStore, UploadStoreError};
use crate::domain::{JobId, StoragePath, UploadFileName, UploadFileNameError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedUpload {
    pub job_id: JobId,
    pub stored_path: StoragePath,
    pub size_bytes: u64,
}

/// Validates an incoming audio upload and persists it under a fresh job id.
pub struct UploadReceiver {
    upload_store: Arc<dyn UploadStore>,
}

impl UploadReceiver {
    pub fn new(upload_store: Arc<dyn UploadStore>) -> Self {
        Self { upload_store }
    }

    /// The file name is checked before any byte is read, so a rejected upload
    /// leaves nothing behind. A stream error of kind `FileTooLarge` is reported
    /// as [`UploadError::TooLarge`].
    #[tracing::instrument(skip(self, stream))]
    pub async fn receive(
        &self,
        file_name: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<ReceivedUpload, UploadError> {
        let file_name = UploadFileName::parse(file_name).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected upload");
        })?;

        let job_id = JobId::new();
        let stored_path = StoragePath::new(&job_id, &file_name);

        let size_bytes = self
            .upload_store
            .store(&stored_path, stream)
            .await
            .map_err(|e| match e {
                UploadStoreError::Io(io_err) if io_err.kind() == io::ErrorKind::FileTooLarge => {
                    tracing::warn!(error = %io_err, path = %stored_path, "Upload exceeds size limit");
                    UploadError::TooLarge(io_err.to_string())
                }
                e => {
                    tracing::error!(error = %e, path = %stored_path, "Failed to save upload");
                    UploadError::StorageWrite(e)
                }
            })?;

        tracing::info!(
            job_id = %job_id,
            path = %stored_path,
            bytes = size_bytes,
            "Upload saved"
        );

        Ok(ReceivedUpload {
            job_id,
            stored_path,
            size_bytes,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{0}")]
    Validation(#[from] UploadFileNameError),
    #[error("failed to save file: {0}")]
    StorageWrite(UploadStoreError),
    #[error("upload too large: {0}")]
    TooLarge(String),
}
