use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{JobId, TranscriptionJob};

/// Process-local job store. Jobs do not survive a restart.
///
/// [`set_available`](Self::set_available) simulates a store outage: while
/// unavailable every operation fails with `ConnectionFailed`.
pub struct InMemoryJobRepository {
    jobs: RwLock<HashMap<JobId, TranscriptionJob>>,
    available: AtomicBool,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.jobs.read().map(|jobs| jobs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepositoryError::ConnectionFailed(
                "job store unavailable".to_string(),
            ))
        }
    }
}

impl Default for InMemoryJobRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::QueryFailed("job store lock poisoned".to_string())
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, job: &TranscriptionJob) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut jobs = self.jobs.write().map_err(poisoned)?;
        if jobs.contains_key(&job.id()) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "duplicate job id: {}",
                job.id()
            )));
        }
        jobs.insert(job.id(), job.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<TranscriptionJob>, RepositoryError> {
        self.check_available()?;
        let jobs = self.jobs.read().map_err(poisoned)?;
        Ok(jobs.get(&id).cloned())
    }

    async fn update(&self, job: &TranscriptionJob) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut jobs = self.jobs.write().map_err(poisoned)?;
        match jobs.get_mut(&job.id()) {
            Some(stored) => {
                *stored = job.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(job.id().to_string())),
        }
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}
