use async_trait::async_trait;

use crate::email::application::ports::outgoing::{EmailSendError, EmailSender};

/// Logs outgoing mail instead of delivering it. Used in development.
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailSendError> {
        tracing::info!(to, subject, body, "Email not delivered (log transport)");
        Ok(())
    }
}
