use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for job postings owned by the external listing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Minimal description of the advertised job captured at intake time so later
/// notifications do not depend on the listing still existing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub job_id: JobId,
    pub title: String,
    pub employer_name: String,
    pub employer_email: String,
    /// Optional note the employer attaches to confirmation emails.
    pub company_note: Option<String>,
}

/// Raw applicant-provided payload for one submission, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub job_id: JobId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
}

/// Declared metadata for an uploaded resume file. The declared content type is
/// what the client claims; see [`super::attachment`] for the trust boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

/// Accepted resume reference stored with the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAttachment {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

/// The sanitized application produced by intake validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub application_id: ApplicationId,
    pub job: JobSnapshot,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub applicant_address: String,
    pub cover_letter: String,
    pub resume: ResumeAttachment,
    pub submitted_at: DateTime<Utc>,
}

/// Review status tracked throughout an application's lifecycle.
///
/// `UnderReview` is the initial status; the remaining statuses are terminal in
/// the sense that no transition leads back to `UnderReview`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "Under Review")]
    UnderReview,
    Shortlisted,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    /// The literal string exposed across the API and email boundary.
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::UnderReview => "Under Review",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Hired => "Hired",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, ApplicationStatus::UnderReview)
    }
}
