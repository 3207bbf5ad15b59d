//! Application intake, status lifecycle, and HTTP routing for job applications.
//!
//! Submissions pass the intake guard and resume validator before anything is
//! persisted; committed records then raise notification events handled by
//! [`crate::notifications`].

pub mod attachment;
pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;

pub use attachment::{AttachmentError, ALLOWED_RESUME_TYPES, MAX_RESUME_BYTES};
pub use domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationSubmission, FileDescriptor, JobId,
    JobSnapshot, ResumeAttachment,
};
pub use intake::{ValidationError, COVER_LETTER_LIMIT, COVER_LETTER_WARNING};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, JobDirectory,
    MemoryApplicationRepository, MemoryJobDirectory, RepositoryError,
};
pub use router::{application_router, ApplicationRouterState};
pub use service::{ApplicationSubmissionService, SubmissionError};
pub use status::{ApplicationStatusWorkflow, TransitionPolicy, WorkflowError};
