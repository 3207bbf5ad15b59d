//! Templated email notifications: typed events, HTML rendering, the SMTP
//! transport with its disabled mode, and fire-and-forget dispatch.

pub mod dispatcher;
pub mod event;
pub mod mailer;
pub mod templates;

pub use dispatcher::{NotificationDispatch, NotificationDispatcher};
pub use event::{AccountRole, NotificationEvent};
pub use mailer::{Mailer, MailerConfig, MailerError};
pub use templates::{render, LinkConfig};
