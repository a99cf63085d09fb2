use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::UserQuery;
use crate::auth::application::use_cases::fetch_profile::{
    FetchUserError, FetchUserOutput, FetchUserProfileUseCase,
};

pub struct FetchUserProfileService {
    user_query: Arc<dyn UserQuery>,
}

impl FetchUserProfileService {
    pub fn new(user_query: Arc<dyn UserQuery>) -> Self {
        Self { user_query }
    }
}

#[async_trait]
impl FetchUserProfileUseCase for FetchUserProfileService {
    async fn execute(&self, email: &str) -> Result<FetchUserOutput, FetchUserError> {
        let user = self
            .user_query
            .find_by_email(email)
            .await?
            .filter(|u| !u.is_deleted)
            .ok_or_else(|| FetchUserError::UserNotFound(email.to_string()))?;

        Ok(FetchUserOutput {
            user_id: user.id,
            name: user.name,
            email: user.email,
            is_verified: user.is_verified,
            referral_code: user.referral_code,
        })
    }
}
