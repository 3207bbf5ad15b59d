use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::notifications::dispatcher::NotificationDispatch;

use super::attachment::MAX_RESUME_BYTES;
use super::domain::{ApplicationId, ApplicationStatus, ApplicationSubmission, FileDescriptor, JobId};
use super::repository::{ApplicationRepository, JobDirectory, RepositoryError};
use super::service::{ApplicationSubmissionService, SubmissionError};
use super::status::{ApplicationStatusWorkflow, WorkflowError};

/// Shared state for the application endpoints.
pub struct ApplicationRouterState<R, J, N> {
    pub service: Arc<ApplicationSubmissionService<R, J, N>>,
    pub workflow: Arc<ApplicationStatusWorkflow<R, N>>,
}

impl<R, J, N> Clone for ApplicationRouterState<R, J, N> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            workflow: Arc::clone(&self.workflow),
        }
    }
}

/// Router builder exposing the HTTP endpoints for intake and status tracking.
pub fn application_router<R, J, N>(state: Arc<ApplicationRouterState<R, J, N>>) -> Router
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
    N: NotificationDispatch + 'static,
{
    Router::new()
        .route(
            "/api/v1/application/post/:job_id",
            post(submit_handler::<R, J, N>),
        )
        .route(
            "/api/v1/application/:application_id/status",
            patch(status_update_handler::<R, J, N>),
        )
        .route(
            "/api/v1/application/:application_id",
            get(status_handler::<R, J, N>),
        )
        // Room for a resume at the cap plus the text fields.
        .layer(DefaultBodyLimit::max(MAX_RESUME_BYTES + 64 * 1024))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    status: ApplicationStatus,
    #[serde(default)]
    message: Option<String>,
}

pub(crate) async fn submit_handler<R, J, N>(
    State(state): State<Arc<ApplicationRouterState<R, J, N>>>,
    Path(job_id): Path<String>,
    multipart: Multipart,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
    N: NotificationDispatch + 'static,
{
    let form = match read_submission_form(multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let Some(resume) = form.resume else {
        return failure(StatusCode::BAD_REQUEST, "resume file is required");
    };

    let submission = ApplicationSubmission {
        job_id: JobId(job_id),
        name: form.name,
        email: form.email,
        phone: form.phone,
        address: form.address,
        cover_letter: form.cover_letter,
    };

    match state.service.submit(submission, &resume) {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Application Submitted Successfully!",
                "application_id": record.application.application_id.0,
            })),
        )
            .into_response(),
        Err(SubmissionError::Validation(err)) => {
            failure(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(SubmissionError::JobNotFound) => {
            failure(StatusCode::NOT_FOUND, "job posting not found")
        }
        Err(SubmissionError::Repository(RepositoryError::Conflict)) => {
            failure(StatusCode::CONFLICT, "application already exists")
        }
        Err(other) => failure(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
    }
}

pub(crate) async fn status_update_handler<R, J, N>(
    State(state): State<Arc<ApplicationRouterState<R, J, N>>>,
    Path(application_id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
    N: NotificationDispatch + 'static,
{
    let id = ApplicationId(application_id);
    match state
        .workflow
        .update_status(&id, payload.status, payload.message)
    {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(err @ WorkflowError::InvalidTransition { .. }) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(WorkflowError::NotFound) => {
            let payload = json!({ "error": "application not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, J, N>(
    State(state): State<Arc<ApplicationRouterState<R, J, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
    N: NotificationDispatch + 'static,
{
    let id = ApplicationId(application_id);
    match state.service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(SubmissionError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "application not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

#[derive(Default)]
struct SubmissionForm {
    name: String,
    email: String,
    phone: String,
    address: String,
    cover_letter: String,
    resume: Option<FileDescriptor>,
}

/// Pull the text fields and the resume part out of the multipart payload.
/// Only the declared metadata of the file part is kept; the bytes themselves
/// go to the attachment store upstream of this core.
async fn read_submission_form(mut multipart: Multipart) -> Result<SubmissionForm, Response> {
    let mut form = SubmissionForm::default();

    while let Some(field) = next_field(&mut multipart).await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => form.name = field_text(field).await?,
            "email" => form.email = field_text(field).await?,
            "phone" => form.phone = field_text(field).await?,
            "address" => form.address = field_text(field).await?,
            "coverLetter" => form.cover_letter = field_text(field).await?,
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|err| {
                    failure(
                        StatusCode::BAD_REQUEST,
                        &format!("could not read resume upload: {err}"),
                    )
                })?;
                form.resume = Some(FileDescriptor {
                    file_name,
                    content_type,
                    size: bytes.len(),
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn next_field(
    multipart: &mut Multipart,
) -> Result<Option<axum::extract::multipart::Field<'_>>, Response> {
    multipart.next_field().await.map_err(|err| {
        failure(
            StatusCode::BAD_REQUEST,
            &format!("malformed multipart payload: {err}"),
        )
    })
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, Response> {
    field.text().await.map_err(|err| {
        failure(
            StatusCode::BAD_REQUEST,
            &format!("malformed multipart payload: {err}"),
        )
    })
}

fn failure(status: StatusCode, message: &str) -> Response {
    let payload = json!({
        "success": false,
        "message": message,
    });
    (status, Json(payload)).into_response()
}
