use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream;

use transcription_service::application::ports::UploadStore;
use transcription_service::application::services::{UploadError, UploadReceiver};
use transcription_service::domain::UploadFileNameError;

use crate::helpers::{FailingUploadStore, byte_stream, create_upload_store, files_in};

#[tokio::test]
async fn given_wav_upload_when_receiving_then_file_is_stored_under_job_id_prefix() {
    let (dir, store) = create_upload_store();
    let receiver = UploadReceiver::new(store.clone());

    let received = receiver
        .receive(
            "sample.wav",
            byte_stream(vec![b"RIFF".as_slice(), b"data".as_slice()]),
        )
        .await
        .unwrap();

    assert_eq!(received.size_bytes, 8);
    assert_eq!(
        received.stored_path.as_str(),
        format!("{}_sample.wav", received.job_id)
    );
    assert_eq!(files_in(&dir), vec![received.stored_path.to_string()]);
    assert_eq!(store.fetch(&received.stored_path).await.unwrap(), b"RIFFdata");
}

#[tokio::test]
async fn given_non_wav_upload_when_receiving_then_rejected_before_any_write() {
    let (dir, store) = create_upload_store();
    let receiver = UploadReceiver::new(store);

    let result = receiver
        .receive("notes.txt", byte_stream(vec![b"some notes".as_slice()]))
        .await;

    assert!(matches!(
        result,
        Err(UploadError::Validation(
            UploadFileNameError::UnsupportedExtension(_)
        ))
    ));
    assert!(files_in(&dir).is_empty());
}

#[tokio::test]
async fn given_missing_filename_when_receiving_then_rejected_as_validation_error() {
    let (_dir, store) = create_upload_store();
    let receiver = UploadReceiver::new(store);

    let result = receiver.receive("", byte_stream(vec![])).await;

    assert!(matches!(
        result,
        Err(UploadError::Validation(UploadFileNameError::Missing))
    ));
}

#[tokio::test]
async fn given_interrupted_stream_when_receiving_then_storage_error_and_no_file_left() {
    let (dir, store) = create_upload_store();
    let receiver = UploadReceiver::new(store);

    let chunks: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "network drop")),
    ];

    let result = receiver
        .receive("sample.wav", Box::pin(stream::iter(chunks)))
        .await;

    assert!(matches!(result, Err(UploadError::StorageWrite(_))));
    assert!(files_in(&dir).is_empty());
}

#[tokio::test]
async fn given_failing_store_when_receiving_then_storage_write_error() {
    let receiver = UploadReceiver::new(Arc::new(FailingUploadStore));

    let result = receiver
        .receive("sample.wav", byte_stream(vec![b"data".as_slice()]))
        .await;

    assert!(matches!(result, Err(UploadError::StorageWrite(_))));
}

#[tokio::test]
async fn given_two_uploads_with_same_name_when_receiving_then_job_ids_differ() {
    let (dir, store) = create_upload_store();
    let receiver = UploadReceiver::new(store);

    let first = receiver
        .receive("sample.wav", byte_stream(vec![b"a".as_slice()]))
        .await
        .unwrap();
    let second = receiver
        .receive("sample.wav", byte_stream(vec![b"b".as_slice()]))
        .await
        .unwrap();

    assert_ne!(first.job_id, second.job_id);
    assert_eq!(files_in(&dir).len(), 2);
}

#[tokio::test]
async fn given_stream_cut_by_size_limit_when_receiving_then_too_large_and_no_file_left() {
    let (dir, store) = create_upload_store();
    let receiver = UploadReceiver::new(store);

    let chunks: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from("RIFF")),
        Err(io::Error::new(
            io::ErrorKind::FileTooLarge,
            "length limit exceeded",
        )),
    ];

    let result = receiver
        .receive("sample.wav", Box::pin(stream::iter(chunks)))
        .await;

    assert!(matches!(result, Err(UploadError::TooLarge(_))));
    assert!(files_in(&dir).is_empty());
}
