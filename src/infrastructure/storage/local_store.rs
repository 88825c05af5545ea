use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{UploadStore, UploadStoreError};
use crate::domain::StoragePath;

/// Upload directory on the local filesystem. Writes go through a multipart
/// upload that only becomes visible under its final name on completion.
pub struct LocalUploadStore {
    base_path: PathBuf,
    inner: Arc<LocalFileSystem>,
}

impl LocalUploadStore {
    /// Creates the upload directory if it does not exist yet.
    pub fn new(base_path: PathBuf) -> Result<Self, UploadStoreError> {
        std::fs::create_dir_all(&base_path).map_err(UploadStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| UploadStoreError::WriteFailed(e.to_string()))?;
        tracing::info!(upload_dir = %base_path.display(), "Upload directory ready");
        Ok(Self {
            base_path,
            inner: Arc::new(fs),
        })
    }
}

#[async_trait::async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, UploadStoreError> {
        let store_path = StorePath::from(path.as_str());
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| UploadStoreError::WriteFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(UploadStoreError::Io(e));
                }
            };
            if bytes.is_empty() {
                continue;
            }
            total_bytes += bytes.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                let _ = upload.abort().await;
                return Err(UploadStoreError::WriteFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| UploadStoreError::WriteFailed(e.to_string()))?;

        Ok(total_bytes)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, UploadStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = match self.inner.get(&store_path).await {
            Ok(r) => r,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(UploadStoreError::NotFound(path.to_string()));
            }
            Err(e) => return Err(UploadStoreError::ReadFailed(e.to_string())),
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| UploadStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.base_path)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }
}
