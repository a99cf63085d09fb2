use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};

use crate::auth::application::domain::entities::{CodePurpose, UserId};
use crate::auth::application::ports::outgoing::{
    NewVerificationCode, VerificationCodeRepository, VerificationCodeRepositoryError,
};

pub const CODE_LENGTH: usize = 10;
pub const DEFAULT_TTL_MINUTES: i64 = 30;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerificationCodeError {
    #[error("Verification code not found")]
    NotFound,

    #[error("Verification code has expired")]
    Expired,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<VerificationCodeRepositoryError> for VerificationCodeError {
    fn from(e: VerificationCodeRepositoryError) -> Self {
        match e {
            VerificationCodeRepositoryError::DatabaseError(msg) => Self::RepositoryError(msg),
        }
    }
}

/// Single-use, expiring codes. At most one live code per user and purpose.
#[derive(Clone)]
pub struct VerificationCodeService {
    repository: Arc<dyn VerificationCodeRepository>,
    ttl: Duration,
}

impl VerificationCodeService {
    pub fn new(repository: Arc<dyn VerificationCodeRepository>, ttl_minutes: i64) -> Self {
        Self::with_ttl(repository, Duration::minutes(ttl_minutes))
    }

    pub fn with_ttl(repository: Arc<dyn VerificationCodeRepository>, ttl: Duration) -> Self {
        Self { repository, ttl }
    }

    pub async fn issue(
        &self,
        user_id: UserId,
        purpose: CodePurpose,
    ) -> Result<String, VerificationCodeError> {
        let removed = self.repository.delete_unused(user_id, purpose).await?;
        if removed > 0 {
            tracing::debug!(user_id = %user_id, purpose = %purpose, removed, "Replaced stale verification codes");
        }

        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(CODE_LENGTH)
            .map(char::from)
            .collect();

        self.repository
            .insert(NewVerificationCode {
                user_id,
                purpose,
                code: code.clone(),
                expires_at: Utc::now() + self.ttl,
            })
            .await?;

        Ok(code)
    }

    pub async fn consume(
        &self,
        user_id: UserId,
        purpose: CodePurpose,
        supplied: &str,
    ) -> Result<(), VerificationCodeError> {
        let record = self
            .repository
            .find_unused(user_id, purpose, supplied.trim())
            .await?
            .ok_or(VerificationCodeError::NotFound)?;

        if record.is_expired_at(Utc::now()) {
            return Err(VerificationCodeError::Expired);
        }

        self.repository.mark_used(record.id).await?;
        Ok(())
    }
}
