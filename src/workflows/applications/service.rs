use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::notifications::dispatcher::NotificationDispatch;
use crate::notifications::event::NotificationEvent;

use super::domain::{ApplicationId, ApplicationStatus, ApplicationSubmission, FileDescriptor};
use super::intake::{SubmissionGuard, ValidationError};
use super::repository::{
    ApplicationRecord, ApplicationRepository, JobDirectory, RepositoryError,
};

/// Service composing the submission guard, record store, job directory, and
/// notification dispatch.
///
/// Role gating (only non-employers may apply) is an upstream concern; callers
/// reach this service after that check has passed.
pub struct ApplicationSubmissionService<R, J, N> {
    guard: SubmissionGuard,
    repository: Arc<R>,
    jobs: Arc<J>,
    notifications: Arc<N>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<R, J, N> ApplicationSubmissionService<R, J, N>
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
    N: NotificationDispatch + 'static,
{
    pub fn new(repository: Arc<R>, jobs: Arc<J>, notifications: Arc<N>) -> Self {
        Self {
            guard: SubmissionGuard,
            repository,
            jobs,
            notifications,
        }
    }

    /// Validate and persist a new application, then raise the employer and
    /// applicant notifications.
    ///
    /// Both dispatches happen after the record is committed and independently
    /// of each other; a failed notification never unwinds the submission.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
        resume: &FileDescriptor,
    ) -> Result<ApplicationRecord, SubmissionError> {
        let job_id = submission.job_id.clone();
        let job = self
            .jobs
            .job(&job_id)?
            .ok_or(SubmissionError::JobNotFound)?;

        let mut application = self
            .guard
            .application_from_submission(submission, job, resume)?;
        application.application_id = next_application_id();

        let record = ApplicationRecord {
            application,
            status: ApplicationStatus::UnderReview,
        };
        let stored = self.repository.insert(record)?;

        info!(
            application_id = %stored.application.application_id.0,
            job_id = %stored.application.job.job_id.0,
            "application submitted"
        );

        let job = &stored.application.job;
        self.notifications.dispatch(
            NotificationEvent::NewApplication {
                employer_name: job.employer_name.clone(),
                job_title: job.title.clone(),
                applicant_name: stored.application.applicant_name.clone(),
                applicant_email: stored.application.applicant_email.clone(),
                applicant_phone: stored.application.applicant_phone.clone(),
            },
            &job.employer_email,
        );
        self.notifications.dispatch(
            NotificationEvent::ApplicationConfirmation {
                applicant_name: stored.application.applicant_name.clone(),
                job_title: job.title.clone(),
                company_note: job.company_note.clone(),
            },
            &stored.application.applicant_email,
        );

        Ok(stored)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(&self, id: &ApplicationId) -> Result<ApplicationRecord, SubmissionError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(SubmissionError::Repository(RepositoryError::NotFound))?;
        Ok(record)
    }
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("job posting not found")]
    JobNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
