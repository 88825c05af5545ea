use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::StoragePath;

/// Durable storage for uploaded audio.
#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    /// Streams `stream` to `path`. Nothing is left at `path` when this fails.
    async fn store(
        &self,
        path: &StoragePath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, UploadStoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, UploadStoreError>;

    async fn is_available(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
