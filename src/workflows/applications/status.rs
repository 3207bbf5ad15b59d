use std::sync::Arc;

use tracing::info;

use crate::notifications::dispatcher::NotificationDispatch;
use crate::notifications::event::NotificationEvent;

use super::domain::{ApplicationId, ApplicationStatus};
use super::repository::{ApplicationRecord, ApplicationRepository, RepositoryError};

/// Governs whether an application already in a terminal status may be moved to
/// another terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Terminal statuses may be revised (e.g. Shortlisted to Hired).
    #[default]
    AllowRetransition,
    /// The first terminal status is final.
    LockTerminal,
}

/// Error raised by the status workflow.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("invalid status transition: {} -> {}", from.label(), requested.label())]
    InvalidTransition {
        from: ApplicationStatus,
        requested: ApplicationStatus,
    },
    #[error("application not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// State machine for an existing application's review status.
///
/// Ownership checks (the caller must be the employer owning the referenced
/// job) happen upstream; this workflow enforces only the transition rules.
pub struct ApplicationStatusWorkflow<R, N> {
    policy: TransitionPolicy,
    repository: Arc<R>,
    notifications: Arc<N>,
}

impl<R, N> ApplicationStatusWorkflow<R, N>
where
    R: ApplicationRepository + 'static,
    N: NotificationDispatch + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>) -> Self {
        Self::with_policy(TransitionPolicy::default(), repository, notifications)
    }

    pub fn with_policy(
        policy: TransitionPolicy,
        repository: Arc<R>,
        notifications: Arc<N>,
    ) -> Self {
        Self {
            policy,
            repository,
            notifications,
        }
    }

    /// Move an application to a new review status and notify the applicant.
    ///
    /// `new_status` must be terminal; moving back to `Under Review` is always
    /// rejected. The optional employer message travels to the applicant
    /// verbatim. Nothing is mutated on failure; the notification is a
    /// best-effort follow-up after the new status is persisted.
    pub fn update_status(
        &self,
        id: &ApplicationId,
        new_status: ApplicationStatus,
        message: Option<String>,
    ) -> Result<ApplicationRecord, WorkflowError> {
        let mut record = self.repository.fetch(id)?.ok_or(WorkflowError::NotFound)?;

        if !new_status.is_terminal() {
            return Err(WorkflowError::InvalidTransition {
                from: record.status,
                requested: new_status,
            });
        }

        if self.policy == TransitionPolicy::LockTerminal && record.status.is_terminal() {
            return Err(WorkflowError::InvalidTransition {
                from: record.status,
                requested: new_status,
            });
        }

        record.status = new_status;
        self.repository.update(record.clone())?;

        info!(
            application_id = %record.application.application_id.0,
            status = new_status.label(),
            "application status updated"
        );

        self.notifications.dispatch(
            NotificationEvent::StatusUpdate {
                applicant_name: record.application.applicant_name.clone(),
                job_title: record.application.job.title.clone(),
                status: new_status,
                message,
            },
            &record.application.applicant_email,
        );

        Ok(record)
    }
}
