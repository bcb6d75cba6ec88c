use crate::email::application::ports::outgoing::{EmailSendError, EmailSender};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Keeps mail in memory instead of sending it. Used when no SMTP server is
/// configured and in tests.
#[derive(Clone, Default)]
pub struct MockEmailSender {
    sent_emails: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent_emails
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<(), EmailSendError> {
        info!(to, subject, "Email captured by mock sender");
        self.sent_emails
            .lock()
            .map_err(|e| EmailSendError::Transport(e.to_string()))?
            .push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                html_body: html_body.to_string(),
            });
        Ok(())
    }
}
