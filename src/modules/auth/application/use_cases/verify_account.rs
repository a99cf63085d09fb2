use async_trait::async_trait;

use super::{normalize_email, CredentialInputError};

#[derive(Debug, Clone)]
pub struct VerifyAccountRequest {
    email: String,
    code: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifyAccountInputError {
    #[error("Verification code cannot be empty")]
    EmptyCode,

    #[error(transparent)]
    Credentials(#[from] CredentialInputError),
}

impl VerifyAccountRequest {
    pub fn new(email: String, code: String) -> Result<Self, VerifyAccountInputError> {
        let email = normalize_email(&email)?;
        let code = code.trim().to_string();
        if code.is_empty() {
            return Err(VerifyAccountInputError::EmptyCode);
        }
        Ok(Self { email, code })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyAccountOutcome {
    Verified,
    AlreadyVerified,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifyAccountError {
    #[error("User not found")]
    UserNotFound,

    #[error("Verification code not found")]
    CodeNotFound,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait VerifyAccountUseCase: Send + Sync {
    async fn execute(
        &self,
        request: VerifyAccountRequest,
    ) -> Result<VerifyAccountOutcome, VerifyAccountError>;
}
