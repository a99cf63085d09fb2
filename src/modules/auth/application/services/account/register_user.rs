use std::sync::Arc;

use async_trait::async_trait;

use super::issue_token_pair;
use crate::auth::application::domain::entities::{CodePurpose, UserId};
use crate::auth::application::ports::outgoing::{
    CreateUserData, PasswordHasher, TokenProvider, UserQuery, UserRepository, UserRepositoryError,
};
use crate::auth::application::services::{generate_referral_code, VerificationCodeService};
use crate::auth::application::use_cases::register_user::{
    RegisterUserError, RegisterUserInput, RegisterUserOutput, RegisterUserUseCase,
};
use crate::email::application::ports::outgoing::{AccountNotifier, Recipient};

pub const MAX_REFERRAL_CODE_ATTEMPTS: usize = 10;

pub struct RegisterUserService {
    user_query: Arc<dyn UserQuery>,
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
    verification_codes: VerificationCodeService,
    notifier: Arc<dyn AccountNotifier>,
}

impl RegisterUserService {
    pub fn new(
        user_query: Arc<dyn UserQuery>,
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
        verification_codes: VerificationCodeService,
        notifier: Arc<dyn AccountNotifier>,
    ) -> Self {
        Self {
            user_query,
            user_repository,
            password_hasher,
            token_provider,
            verification_codes,
            notifier,
        }
    }

    /// Best effort: an unknown code or a failed lookup registers without a referrer.
    async fn resolve_referrer(&self, code: Option<&str>) -> Option<UserId> {
        let code = code?;
        match self.user_query.find_by_referral_code(code).await {
            Ok(Some(user)) if !user.is_deleted => Some(user.id),
            Ok(_) => {
                tracing::info!(referral_code = code, "Referral code did not match any user");
                None
            }
            Err(e) => {
                tracing::warn!(referral_code = code, error = %e, "Referral lookup failed, ignoring");
                None
            }
        }
    }

    async fn unique_referral_code(&self, name: &str) -> Result<String, RegisterUserError> {
        for _ in 0..MAX_REFERRAL_CODE_ATTEMPTS {
            let candidate = generate_referral_code(name);
            let taken = self
                .user_query
                .referral_code_exists(&candidate)
                .await
                .map_err(|e| RegisterUserError::RepositoryError(e.to_string()))?;
            if !taken {
                return Ok(candidate);
            }
        }
        Err(RegisterUserError::ReferralCodeExhausted)
    }

    async fn send_verification(&self, user_id: UserId, recipient: Recipient) {
        let code = match self
            .verification_codes
            .issue(user_id, CodePurpose::EmailVerification)
            .await
        {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to issue verification code");
                return;
            }
        };

        if let Err(e) = self.notifier.send_verification_code(&recipient, &code).await {
            tracing::error!(user_id = %user_id, error = %e, "Failed to deliver verification code");
        }
    }
}

#[async_trait]
impl RegisterUserUseCase for RegisterUserService {
    async fn execute(
        &self,
        input: RegisterUserInput,
    ) -> Result<RegisterUserOutput, RegisterUserError> {
        let existing = self
            .user_query
            .find_by_email(input.email())
            .await
            .map_err(|e| RegisterUserError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(RegisterUserError::UserAlreadyExists);
        }

        let referred_by = self.resolve_referrer(input.referral_code()).await;

        let password_hash = self
            .password_hasher
            .hash_password(input.password())
            .await
            .map_err(|e| RegisterUserError::HashingFailed(e.to_string()))?;

        let mut attempts = 0;
        let user = loop {
            let referral_code = self.unique_referral_code(input.name()).await?;
            let created = self
                .user_repository
                .create_user(CreateUserData {
                    name: input.name().to_string(),
                    email: input.email().to_string(),
                    password_hash: password_hash.clone(),
                    referral_code,
                    referred_by,
                })
                .await;

            match created {
                Ok(user) => break user,
                Err(UserRepositoryError::ReferralCodeTaken) => {
                    attempts += 1;
                    if attempts >= MAX_REFERRAL_CODE_ATTEMPTS {
                        return Err(RegisterUserError::ReferralCodeExhausted);
                    }
                    tracing::warn!(attempts, "Referral code taken concurrently, retrying");
                }
                Err(UserRepositoryError::UserAlreadyExists) => {
                    return Err(RegisterUserError::UserAlreadyExists)
                }
                Err(other) => return Err(RegisterUserError::RepositoryError(other.to_string())),
            }
        };

        tracing::info!(user_id = %user.id, referred = referred_by.is_some(), "User registered");

        self.send_verification(
            user.id,
            Recipient {
                name: user.name.clone(),
                email: user.email.clone(),
            },
        )
        .await;

        let tokens = issue_token_pair(self.token_provider.as_ref(), &user.email)
            .map_err(|e| RegisterUserError::TokenGenerationFailed(e.to_string()))?;

        Ok(RegisterUserOutput {
            user,
            tokens,
            referral_applied: referred_by.is_some(),
        })
    }
}
