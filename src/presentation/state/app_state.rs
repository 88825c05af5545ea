use std::sync::Arc;

use crate::application::ports::{JobRepository, TaskDispatcher, UploadStore};
use crate::application::services::{StatusQueryService, SubmissionService, UploadReceiver};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub upload_receiver: Arc<UploadReceiver>,
    pub submission_service: Arc<SubmissionService>,
    pub status_query_service: Arc<StatusQueryService>,
    pub job_repository: Arc<dyn JobRepository>,
    pub upload_store: Arc<dyn UploadStore>,
    pub settings: Settings,
}

impl AppState {
    /// Wires the request-path services around the shared store handles.
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        upload_store: Arc<dyn UploadStore>,
        dispatcher: Arc<dyn TaskDispatcher>,
        settings: Settings,
    ) -> Self {
        Self {
            upload_receiver: Arc::new(UploadReceiver::new(Arc::clone(&upload_store))),
            submission_service: Arc::new(SubmissionService::new(
                Arc::clone(&job_repository),
                dispatcher,
            )),
            status_query_service: Arc::new(StatusQueryService::new(Arc::clone(&job_repository))),
            job_repository,
            upload_store,
            settings,
        }
    }
}
