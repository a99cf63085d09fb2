use async_trait::async_trait;

use super::{normalize_email, require_password, CredentialInputError, TokenPair};
use crate::auth::application::domain::entities::UserId;

/// Validated login request.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, CredentialInputError> {
        Ok(Self {
            email: normalize_email(&email)?,
            password: require_password(&password)?,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    /// Unknown email, deleted account and wrong password all look the same.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),
}

#[derive(Debug, Clone)]
pub struct LoginUserInfo {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
}

#[derive(Debug, Clone)]
pub struct LoginUserResponse {
    pub tokens: TokenPair,
    pub user: LoginUserInfo,
}

#[async_trait]
pub trait LoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError>;
}
