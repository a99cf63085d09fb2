use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotificationError {
    #[error("Could not build notice: {0}")]
    InvalidLink(String),

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// Delivers one-time codes to account holders.
#[async_trait]
pub trait AccountNotifier: Send + Sync {
    async fn send_verification_code(
        &self,
        recipient: &Recipient,
        code: &str,
    ) -> Result<(), NotificationError>;

    async fn send_password_reset_code(
        &self,
        recipient: &Recipient,
        code: &str,
    ) -> Result<(), NotificationError>;
}
