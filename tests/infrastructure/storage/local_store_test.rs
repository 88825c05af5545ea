use std::io;

use bytes::Bytes;
use futures::stream;

use transcription_service::application::ports::{UploadStore, UploadStoreError};
use transcription_service::domain::StoragePath;
use transcription_service::infrastructure::storage::LocalUploadStore;

use crate::helpers::{byte_stream, create_upload_store, files_in};

#[tokio::test]
async fn given_valid_stream_when_storing_then_file_is_persisted() {
    let (dir, store) = create_upload_store();
    let path = StoragePath::from_raw("job_test.wav");

    let size = store
        .store(
            &path,
            byte_stream(vec![b"hello ".as_slice(), b"world".as_slice()]),
        )
        .await
        .unwrap();

    assert_eq!(size, 11);
    assert_eq!(
        std::fs::read(dir.path().join("job_test.wav")).unwrap(),
        b"hello world"
    );
}

#[tokio::test]
async fn given_stored_file_when_fetching_then_bytes_match_original() {
    let (_dir, store) = create_upload_store();
    let path = StoragePath::from_raw("job_test.wav");

    store
        .store(&path, byte_stream(vec![b"test content".as_slice()]))
        .await
        .unwrap();

    let fetched = store.fetch(&path).await.unwrap();
    assert_eq!(fetched, b"test content");
}

#[tokio::test]
async fn given_stream_error_when_storing_then_returns_error_and_leaves_no_file() {
    let (dir, store) = create_upload_store();
    let path = StoragePath::from_raw("job_test.wav");

    let chunks: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "network drop",
        )),
    ];

    let result = store.store(&path, Box::pin(stream::iter(chunks))).await;

    assert!(matches!(result, Err(UploadStoreError::Io(_))));
    assert!(files_in(&dir).is_empty());
}

#[tokio::test]
async fn given_nonexistent_path_when_fetching_then_returns_not_found() {
    let (_dir, store) = create_upload_store();

    let result = store.fetch(&StoragePath::from_raw("missing.wav")).await;

    assert!(matches!(result, Err(UploadStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_missing_base_directory_when_creating_then_directory_is_bootstrapped() {
    let parent = tempfile::TempDir::new().unwrap();
    let base = parent.path().join("nested").join("uploads");

    let store = LocalUploadStore::new(base.clone()).unwrap();

    assert!(base.is_dir());
    assert!(store.is_available().await);
}

#[tokio::test]
async fn given_removed_base_directory_when_checking_availability_then_false() {
    let parent = tempfile::TempDir::new().unwrap();
    let base = parent.path().join("uploads");
    let store = LocalUploadStore::new(base.clone()).unwrap();

    std::fs::remove_dir_all(&base).unwrap();

    assert!(!store.is_available().await);
}
