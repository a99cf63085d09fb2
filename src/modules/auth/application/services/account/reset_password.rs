use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::domain::entities::CodePurpose;
use crate::auth::application::ports::outgoing::{PasswordHasher, UserQuery, UserRepository};
use crate::auth::application::services::{VerificationCodeError, VerificationCodeService};
use crate::auth::application::use_cases::reset_password::{
    ResetPasswordError, ResetPasswordRequest, ResetPasswordUseCase,
};

pub struct ResetPasswordService {
    user_query: Arc<dyn UserQuery>,
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    verification_codes: VerificationCodeService,
}

impl ResetPasswordService {
    pub fn new(
        user_query: Arc<dyn UserQuery>,
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        verification_codes: VerificationCodeService,
    ) -> Self {
        Self {
            user_query,
            user_repository,
            password_hasher,
            verification_codes,
        }
    }
}

#[async_trait]
impl ResetPasswordUseCase for ResetPasswordService {
    async fn execute(&self, request: ResetPasswordRequest) -> Result<(), ResetPasswordError> {
        let user = self
            .user_query
            .find_by_email(request.email())
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?
            .filter(|u| !u.is_deleted)
            .ok_or(ResetPasswordError::UserNotFound)?;

        // Hash first so a hashing failure does not burn the code.
        let password_hash = self
            .password_hasher
            .hash_password(request.new_password())
            .await
            .map_err(|e| ResetPasswordError::HashingFailed(e.to_string()))?;

        self.verification_codes
            .consume(user.id, CodePurpose::ForgotPassword, request.code())
            .await
            .map_err(|e| match e {
                VerificationCodeError::NotFound => ResetPasswordError::CodeNotFound,
                VerificationCodeError::Expired => ResetPasswordError::CodeExpired,
                VerificationCodeError::RepositoryError(msg) => {
                    ResetPasswordError::RepositoryError(msg)
                }
            })?;

        self.user_repository
            .update_password(user.id, password_hash)
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Password reset");
        Ok(())
    }
}
