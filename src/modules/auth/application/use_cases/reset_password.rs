use async_trait::async_trait;

use super::{normalize_email, require_password, CredentialInputError};

#[derive(Debug, Clone)]
pub struct ResetPasswordRequest {
    email: String,
    code: String,
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResetPasswordInputError {
    #[error("Reset code cannot be empty")]
    EmptyCode,

    #[error(transparent)]
    Credentials(#[from] CredentialInputError),
}

impl ResetPasswordRequest {
    pub fn new(
        email: String,
        code: String,
        new_password: String,
    ) -> Result<Self, ResetPasswordInputError> {
        let email = normalize_email(&email)?;
        let code = code.trim().to_string();
        if code.is_empty() {
            return Err(ResetPasswordInputError::EmptyCode);
        }
        let new_password = require_password(&new_password)?;

        Ok(Self {
            email,
            code,
            new_password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("User not found")]
    UserNotFound,

    #[error("Reset code not found")]
    CodeNotFound,

    #[error("Reset code has expired")]
    CodeExpired,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ResetPasswordUseCase: Send + Sync {
    async fn execute(&self, request: ResetPasswordRequest) -> Result<(), ResetPasswordError>;
}
