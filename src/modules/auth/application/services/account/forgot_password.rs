use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::domain::entities::CodePurpose;
use crate::auth::application::ports::outgoing::UserQuery;
use crate::auth::application::services::VerificationCodeService;
use crate::auth::application::use_cases::forgot_password::{
    ForgotPasswordError, ForgotPasswordUseCase,
};
use crate::email::application::ports::outgoing::{AccountNotifier, Recipient};

pub struct ForgotPasswordService {
    user_query: Arc<dyn UserQuery>,
    verification_codes: VerificationCodeService,
    notifier: Arc<dyn AccountNotifier>,
}

impl ForgotPasswordService {
    pub fn new(
        user_query: Arc<dyn UserQuery>,
        verification_codes: VerificationCodeService,
        notifier: Arc<dyn AccountNotifier>,
    ) -> Self {
        Self {
            user_query,
            verification_codes,
            notifier,
        }
    }
}

#[async_trait]
impl ForgotPasswordUseCase for ForgotPasswordService {
    async fn execute(&self, email: &str) -> Result<(), ForgotPasswordError> {
        let user = self
            .user_query
            .find_by_email(email)
            .await
            .map_err(|e| ForgotPasswordError::RepositoryError(e.to_string()))?
            .filter(|u| !u.is_deleted)
            .ok_or(ForgotPasswordError::UserNotFound)?;

        let code = self
            .verification_codes
            .issue(user.id, CodePurpose::ForgotPassword)
            .await
            .map_err(|e| ForgotPasswordError::RepositoryError(e.to_string()))?;

        let recipient = Recipient {
            name: user.name,
            email: user.email,
        };
        self.notifier
            .send_password_reset_code(&recipient, &code)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Failed to deliver reset code");
                ForgotPasswordError::NotificationFailed(e.to_string())
            })?;

        tracing::info!(user_id = %user.id, "Password reset code issued");
        Ok(())
    }
}
