use async_trait::async_trait;

use super::{normalize_email, require_password, CredentialInputError, TokenPair};
use crate::auth::application::ports::outgoing::UserResult;

#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    name: String,
    email: String,
    password: String,
    referral_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegisterInputError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error(transparent)]
    Credentials(#[from] CredentialInputError),
}

impl RegisterUserInput {
    pub fn new(
        name: String,
        email: String,
        password: String,
        referral_code: Option<String>,
    ) -> Result<Self, RegisterInputError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(RegisterInputError::EmptyName);
        }

        let email = normalize_email(&email)?;
        let password = require_password(&password)?;
        let referral_code = referral_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            name,
            email,
            password,
            referral_code,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn referral_code(&self) -> Option<&str> {
        self.referral_code.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct RegisterUserOutput {
    pub user: UserResult,
    pub tokens: TokenPair,
    /// Whether a supplied referral code resolved to an existing user.
    pub referral_applied: bool,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RegisterUserError {
    #[error("User with this email already exists")]
    UserAlreadyExists,

    #[error("Could not allocate a unique referral code")]
    ReferralCodeExhausted,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait RegisterUserUseCase: Send + Sync {
    async fn execute(&self, input: RegisterUserInput)
        -> Result<RegisterUserOutput, RegisterUserError>;
}
