use std::env;
use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info, warn};

/// Mail settings sourced from the environment at startup.
///
/// `username`/`password` are the provider credentials; `service` optionally
/// names the provider (defaults to gmail). Either credential missing puts the
/// mailer in disabled mode.
#[derive(Debug, Clone, Default)]
pub struct MailerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub service: Option<String>,
}

impl MailerConfig {
    pub fn from_env() -> Self {
        Self {
            username: non_empty_var("SMTP_EMAIL"),
            password: non_empty_var("SMTP_PASS"),
            service: non_empty_var("SMTP_SERVICE"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

const DEFAULT_SERVICE: &str = "gmail";

/// Bound on a single delivery so a hung SMTP session cannot hold a dispatch
/// task forever.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Map a provider name to its SMTP relay host. Unrecognized values are used
/// verbatim as a hostname.
fn relay_host(service: &str) -> String {
    match service.trim().to_ascii_lowercase().as_str() {
        "gmail" => "smtp.gmail.com".to_string(),
        "outlook" | "office365" => "smtp.office365.com".to_string(),
        "yahoo" => "smtp.mail.yahoo.com".to_string(),
        other => other.to_string(),
    }
}

/// Construction-time mailer failures. Delivery-time failures never surface as
/// errors; they are logged inside [`Mailer::send`].
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("invalid SMTP sender address: {0}")]
    InvalidSender(String),
    #[error("SMTP relay setup failed: {0}")]
    Relay(String),
}

struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

/// Outbound mail transport.
///
/// With credentials configured, delivers HTML mail over SMTP. Without them the
/// mailer is *disabled*: `send` performs no network call and logs the
/// suppressed subject and recipient, so the rest of the system runs unchanged
/// in environments with no mail configured.
pub struct Mailer {
    sender: Option<SmtpSender>,
}

impl Mailer {
    /// Build from config, falling back to disabled mode when either credential
    /// is absent.
    pub fn from_config(config: &MailerConfig) -> Result<Self, MailerError> {
        let (Some(username), Some(password)) = (&config.username, &config.password) else {
            warn!("SMTP credentials not configured; email delivery disabled");
            return Ok(Self::disabled());
        };

        let service = config.service.as_deref().unwrap_or(DEFAULT_SERVICE);
        let host = relay_host(service);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
            .map_err(|err| MailerError::Relay(err.to_string()))?
            .credentials(Credentials::new(username.clone(), password.clone()))
            .build();

        let from: Mailbox = format!("CareerConnect <{username}>")
            .parse()
            .map_err(|err| MailerError::InvalidSender(format!("{err}")))?;

        Ok(Self {
            sender: Some(SmtpSender { transport, from }),
        })
    }

    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn is_disabled(&self) -> bool {
        self.sender.is_none()
    }

    /// Deliver one message. All failures (bad addresses, SMTP errors,
    /// timeouts) are logged and swallowed; callers get no acknowledgment and
    /// need none.
    pub async fn send(&self, to: &str, subject: &str, html: &str) {
        let Some(sender) = &self.sender else {
            info!(%to, %subject, "email suppressed (SMTP not configured)");
            return;
        };

        let to_mailbox: Mailbox = match to.parse() {
            Ok(mailbox) => mailbox,
            Err(err) => {
                error!(%to, %subject, %err, "invalid recipient address; email dropped");
                return;
            }
        };

        let message = match Message::builder()
            .from(sender.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
        {
            Ok(message) => message,
            Err(err) => {
                error!(%to, %subject, %err, "failed to build email message");
                return;
            }
        };

        match tokio::time::timeout(SEND_TIMEOUT, sender.transport.send(message)).await {
            Ok(Ok(_)) => info!(%to, %subject, "email sent"),
            Ok(Err(err)) => error!(%to, %subject, %err, "email delivery failed"),
            Err(_) => error!(%to, %subject, timeout_secs = SEND_TIMEOUT.as_secs(), "email delivery timed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_produce_a_disabled_mailer() {
        for config in [
            MailerConfig::default(),
            MailerConfig {
                username: Some("careers@example.com".to_string()),
                ..MailerConfig::default()
            },
            MailerConfig {
                password: Some("app-password".to_string()),
                ..MailerConfig::default()
            },
        ] {
            let mailer = Mailer::from_config(&config).expect("construction never fails here");
            assert!(mailer.is_disabled());
        }
    }

    #[tokio::test]
    async fn full_credentials_produce_an_active_mailer() {
        let config = MailerConfig {
            username: Some("careers@example.com".to_string()),
            password: Some("app-password".to_string()),
            service: None,
        };
        let mailer = Mailer::from_config(&config).expect("gmail relay resolves");
        assert!(!mailer.is_disabled());
    }

    #[test]
    fn known_providers_map_to_their_relays() {
        assert_eq!(relay_host("gmail"), "smtp.gmail.com");
        assert_eq!(relay_host("Outlook"), "smtp.office365.com");
        assert_eq!(relay_host("yahoo"), "smtp.mail.yahoo.com");
        assert_eq!(relay_host("mail.internal.example"), "mail.internal.example");
    }

    #[tokio::test]
    async fn disabled_send_completes_without_network_or_panic() {
        let mailer = Mailer::disabled();
        mailer
            .send("asha@example.com", "Test Subject", "<p>hello</p>")
            .await;
    }
}
