use serde::{Deserialize, Serialize};

use crate::workflows::applications::domain::ApplicationStatus;

/// Account roles referenced by the welcome email body copy. Exactly two
/// variants exist; the template branches on nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRole {
    Employer,
    #[serde(rename = "Job Seeker")]
    JobSeeker,
}

impl AccountRole {
    pub const fn label(self) -> &'static str {
        match self {
            AccountRole::Employer => "Employer",
            AccountRole::JobSeeker => "Job Seeker",
        }
    }
}

/// Typed, transient description of something that happened which should
/// trigger an email. Each variant carries exactly the fields its template
/// renders; events are never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    /// A job posting received a new application; sent to the employer.
    NewApplication {
        employer_name: String,
        job_title: String,
        applicant_name: String,
        applicant_email: String,
        applicant_phone: String,
    },
    /// Receipt sent to the applicant right after submission.
    ApplicationConfirmation {
        applicant_name: String,
        job_title: String,
        company_note: Option<String>,
    },
    /// The employer moved an application to a new status; sent to the applicant.
    StatusUpdate {
        applicant_name: String,
        job_title: String,
        status: ApplicationStatus,
        message: Option<String>,
    },
    /// Account creation greeting.
    Welcome { name: String, role: AccountRole },
}

impl NotificationEvent {
    /// Fixed subject line per event kind.
    pub const fn subject(&self) -> &'static str {
        match self {
            NotificationEvent::NewApplication { .. } => "New Application Received",
            NotificationEvent::ApplicationConfirmation { .. } => {
                "Application Submitted Successfully"
            }
            NotificationEvent::StatusUpdate { .. } => "Your Application Status Has Been Updated",
            NotificationEvent::Welcome { .. } => "Welcome to CareerConnect",
        }
    }
}
