//! CareerConnect job board core: application intake, status lifecycle, and the
//! templated email notification pipeline.
//!
//! Authentication, job-listing CRUD, and the persistent storage engine are
//! external collaborators reached through the traits in
//! [`workflows::applications::repository`].

pub mod config;
pub mod error;
pub mod notifications;
pub mod telemetry;
pub mod workflows;
