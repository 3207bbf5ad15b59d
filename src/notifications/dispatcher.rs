use std::sync::Arc;

use tracing::debug;

use super::event::NotificationEvent;
use super::mailer::Mailer;
use super::templates::{self, LinkConfig};

/// Outbound notification seam so workflows can be exercised with recording
/// doubles.
///
/// `dispatch` is fire-and-forget: the triggering business operation is
/// complete once its record is persisted, and rendering/delivery must never
/// block it or feed a failure back into it.
pub trait NotificationDispatch: Send + Sync {
    fn dispatch(&self, event: NotificationEvent, recipient: &str);
}

/// Dispatcher selecting the subject and template for an event and handing the
/// rendered message to the mailer on a detached task.
///
/// Constructed once at startup and held for the process lifetime. Must run
/// inside a Tokio runtime.
pub struct NotificationDispatcher {
    mailer: Arc<Mailer>,
    links: LinkConfig,
}

impl NotificationDispatcher {
    pub fn new(mailer: Arc<Mailer>, links: LinkConfig) -> Self {
        Self { mailer, links }
    }
}

impl NotificationDispatch for NotificationDispatcher {
    fn dispatch(&self, event: NotificationEvent, recipient: &str) {
        let subject = event.subject();
        let html = templates::render(&event, &self.links);
        let mailer = Arc::clone(&self.mailer);
        let to = recipient.to_string();
        debug!(%to, subject, "queueing notification email");
        tokio::spawn(async move {
            mailer.send(&to, subject, &html).await;
        });
    }
}
