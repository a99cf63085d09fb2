use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("User not found")]
    UserNotFound,

    #[error("Notification failed: {0}")]
    NotificationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ForgotPasswordUseCase: Send + Sync {
    /// `email` must already be normalized.
    async fn execute(&self, email: &str) -> Result<(), ForgotPasswordError>;
}
