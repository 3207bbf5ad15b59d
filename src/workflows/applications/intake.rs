use chrono::Utc;

use super::attachment::{self, AttachmentError};
use super::domain::{
    Application, ApplicationId, ApplicationSubmission, FileDescriptor, JobSnapshot,
};

/// Hard cap on cover letter length, enforced at submission.
pub const COVER_LETTER_LIMIT: usize = 1000;

/// Soft threshold (85% of the cap) where the edge shows a counter warning.
/// Presentation concern only; nothing here enforces it.
pub const COVER_LETTER_WARNING: usize = 850;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("cover letter exceeds {limit} characters ({length} submitted)")]
    CoverLetterTooLong { length: usize, limit: usize },
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}

/// Guard turning raw submissions into persisted-ready [`Application`] values.
///
/// Checks every textual field, the cover letter hard cap, and the resume
/// attachment before anything touches the record store.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionGuard;

impl SubmissionGuard {
    pub fn application_from_submission(
        &self,
        submission: ApplicationSubmission,
        job: JobSnapshot,
        resume: &FileDescriptor,
    ) -> Result<Application, ValidationError> {
        let applicant_name = required(submission.name, "name")?;
        let applicant_email = required(submission.email, "email")?;
        if !looks_like_email(&applicant_email) {
            return Err(ValidationError::InvalidEmail);
        }
        let applicant_phone = required(submission.phone, "phone")?;
        let applicant_address = required(submission.address, "address")?;
        let cover_letter = required(submission.cover_letter, "cover letter")?;

        let length = cover_letter.chars().count();
        if length > COVER_LETTER_LIMIT {
            return Err(ValidationError::CoverLetterTooLong {
                length,
                limit: COVER_LETTER_LIMIT,
            });
        }

        let resume = attachment::validate(resume)?;

        Ok(Application {
            // Placeholder; the submission service assigns the real id.
            application_id: ApplicationId(String::new()),
            job,
            applicant_name,
            applicant_email,
            applicant_phone,
            applicant_address,
            cover_letter,
            resume,
            submitted_at: Utc::now(),
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::applications::domain::JobId;

    fn job() -> JobSnapshot {
        JobSnapshot {
            job_id: JobId("job-000042".to_string()),
            title: "Backend Engineer".to_string(),
            employer_name: "Meera Iyer".to_string(),
            employer_email: "meera@nimbusworks.example".to_string(),
            company_note: None,
        }
    }

    fn submission() -> ApplicationSubmission {
        ApplicationSubmission {
            job_id: JobId("job-000042".to_string()),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9990001111".to_string(),
            address: "12 MG Road".to_string(),
            cover_letter: "I would love to join your team.".to_string(),
        }
    }

    fn resume() -> FileDescriptor {
        FileDescriptor {
            file_name: "resume.png".to_string(),
            content_type: "image/png".to_string(),
            size: 500_000,
        }
    }

    #[test]
    fn valid_submission_produces_application() {
        let guard = SubmissionGuard;
        let application = guard
            .application_from_submission(submission(), job(), &resume())
            .expect("valid submission passes");
        assert_eq!(application.applicant_name, "Asha");
        assert_eq!(application.job.title, "Backend Engineer");
        assert!(application.application_id.0.is_empty());
    }

    #[test]
    fn blank_fields_are_rejected_with_the_field_name() {
        let guard = SubmissionGuard;
        let mut blank_phone = submission();
        blank_phone.phone = "   ".to_string();
        match guard.application_from_submission(blank_phone, job(), &resume()) {
            Err(ValidationError::MissingField(field)) => assert_eq!(field, "phone"),
            other => panic!("expected missing phone, got {other:?}"),
        }
    }

    #[test]
    fn malformed_email_is_rejected() {
        let guard = SubmissionGuard;
        for bad in ["plainaddress", "@example.com", "asha@nodot"] {
            let mut bad_email = submission();
            bad_email.email = bad.to_string();
            assert!(matches!(
                guard.application_from_submission(bad_email, job(), &resume()),
                Err(ValidationError::InvalidEmail)
            ));
        }
    }

    #[test]
    fn cover_letter_at_the_cap_passes() {
        let guard = SubmissionGuard;
        let mut at_cap = submission();
        at_cap.cover_letter = "x".repeat(COVER_LETTER_LIMIT);
        assert!(guard
            .application_from_submission(at_cap, job(), &resume())
            .is_ok());
    }

    #[test]
    fn cover_letter_over_the_cap_is_rejected() {
        let guard = SubmissionGuard;
        let mut over_cap = submission();
        over_cap.cover_letter = "x".repeat(COVER_LETTER_LIMIT + 1);
        match guard.application_from_submission(over_cap, job(), &resume()) {
            Err(ValidationError::CoverLetterTooLong { length, limit }) => {
                assert_eq!(length, COVER_LETTER_LIMIT + 1);
                assert_eq!(limit, COVER_LETTER_LIMIT);
            }
            other => panic!("expected cover letter rejection, got {other:?}"),
        }
    }

    #[test]
    fn attachment_rules_are_applied() {
        let guard = SubmissionGuard;
        let pdf = FileDescriptor {
            file_name: "resume.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size: 100_000,
        };
        assert!(matches!(
            guard.application_from_submission(submission(), job(), &pdf),
            Err(ValidationError::Attachment(_))
        ));
    }
}
