use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::domain::entities::CodePurpose;
use crate::auth::application::ports::outgoing::{UserQuery, UserRepository};
use crate::auth::application::services::{VerificationCodeError, VerificationCodeService};
use crate::auth::application::use_cases::verify_account::{
    VerifyAccountError, VerifyAccountOutcome, VerifyAccountRequest, VerifyAccountUseCase,
};

pub struct VerifyAccountService {
    user_query: Arc<dyn UserQuery>,
    user_repository: Arc<dyn UserRepository>,
    verification_codes: VerificationCodeService,
}

impl VerifyAccountService {
    pub fn new(
        user_query: Arc<dyn UserQuery>,
        user_repository: Arc<dyn UserRepository>,
        verification_codes: VerificationCodeService,
    ) -> Self {
        Self {
            user_query,
            user_repository,
            verification_codes,
        }
    }
}

impl From<VerificationCodeError> for VerifyAccountError {
    fn from(e: VerificationCodeError) -> Self {
        match e {
            VerificationCodeError::NotFound => Self::CodeNotFound,
            VerificationCodeError::Expired => Self::CodeExpired,
            VerificationCodeError::RepositoryError(msg) => Self::RepositoryError(msg),
        }
    }
}

#[async_trait]
impl VerifyAccountUseCase for VerifyAccountService {
    async fn execute(
        &self,
        request: VerifyAccountRequest,
    ) -> Result<VerifyAccountOutcome, VerifyAccountError> {
        let user = self
            .user_query
            .find_by_email(request.email())
            .await
            .map_err(|e| VerifyAccountError::RepositoryError(e.to_string()))?
            .filter(|u| !u.is_deleted)
            .ok_or(VerifyAccountError::UserNotFound)?;

        if user.is_verified {
            return Ok(VerifyAccountOutcome::AlreadyVerified);
        }

        self.verification_codes
            .consume(user.id, CodePurpose::EmailVerification, request.code())
            .await?;

        self.user_repository
            .mark_verified(user.id)
            .await
            .map_err(|e| VerifyAccountError::RepositoryError(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Account verified");
        Ok(VerifyAccountOutcome::Verified)
    }
}
