use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::{CodePurpose, UserId, VerificationCode};

#[derive(Debug, Clone)]
pub struct NewVerificationCode {
    pub user_id: UserId,
    pub purpose: CodePurpose,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerificationCodeRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Removes every unused code of `purpose` for the user. Used codes are kept.
    async fn delete_unused(
        &self,
        user_id: UserId,
        purpose: CodePurpose,
    ) -> Result<u64, VerificationCodeRepositoryError>;

    async fn insert(
        &self,
        code: NewVerificationCode,
    ) -> Result<VerificationCode, VerificationCodeRepositoryError>;

    async fn find_unused(
        &self,
        user_id: UserId,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<Option<VerificationCode>, VerificationCodeRepositoryError>;

    async fn mark_used(&self, code_id: i32) -> Result<(), VerificationCodeRepositoryError>;
}
