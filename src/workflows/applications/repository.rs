use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Application, ApplicationId, ApplicationStatus, JobId, JobSnapshot};

/// Repository record pairing an application with its current review status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application: Application,
    pub status: ApplicationStatus,
}

impl ApplicationRecord {
    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application.application_id.clone(),
            job_id: self.application.job.job_id.clone(),
            job_title: self.application.job.title.clone(),
            status: self.status.label(),
            submitted_at: self.application.submitted_at,
        }
    }
}

/// Storage abstraction over the external record store so the workflow modules
/// can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for record store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view into the job listing store owned by an external service.
pub trait JobDirectory: Send + Sync {
    fn job(&self, id: &JobId) -> Result<Option<JobSnapshot>, RepositoryError>;
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub status: &'static str,
    pub submitted_at: DateTime<Utc>,
}

/// Mutex-guarded map backend used by the dev server and tests.
#[derive(Default, Clone)]
pub struct MemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl MemoryApplicationRepository {
    pub fn is_empty(&self) -> bool {
        self.records.lock().expect("repository mutex poisoned").is_empty()
    }
}

impl ApplicationRepository for MemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application.application_id) {
            guard.insert(record.application.application_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Map-backed job directory for the dev server and tests.
#[derive(Default, Clone)]
pub struct MemoryJobDirectory {
    jobs: Arc<Mutex<HashMap<JobId, JobSnapshot>>>,
}

impl MemoryJobDirectory {
    pub fn register(&self, job: JobSnapshot) {
        let mut guard = self.jobs.lock().expect("directory mutex poisoned");
        guard.insert(job.job_id.clone(), job);
    }
}

impl JobDirectory for MemoryJobDirectory {
    fn job(&self, id: &JobId) -> Result<Option<JobSnapshot>, RepositoryError> {
        let guard = self.jobs.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}
