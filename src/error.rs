use crate::config::ConfigError;
use crate::notifications::mailer::MailerError;
use crate::telemetry::TelemetryError;

/// Fatal startup/runtime errors surfaced by the binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("mail transport error: {0}")]
    Mailer(#[from] MailerError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
