use std::sync::Arc;

use async_trait::async_trait;

use super::issue_token_pair;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider, UserQuery};
use crate::auth::application::use_cases::login_user::{
    LoginError, LoginRequest, LoginUserInfo, LoginUserResponse, LoginUserUseCase,
};

pub struct LoginUserService {
    user_query: Arc<dyn UserQuery>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
}

impl LoginUserService {
    pub fn new(
        user_query: Arc<dyn UserQuery>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            user_query,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl LoginUserUseCase for LoginUserService {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        let user = self
            .user_query
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?
            .filter(|u| !u.is_deleted)
            .ok_or(LoginError::InvalidCredentials)?;

        let matches = self
            .password_hasher
            .verify_password(request.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !matches {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(LoginError::InvalidCredentials);
        }

        let tokens = issue_token_pair(self.token_provider.as_ref(), &user.email)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        Ok(LoginUserResponse {
            tokens,
            user: LoginUserInfo {
                id: user.id,
                name: user.name,
                email: user.email,
                is_verified: user.is_verified,
            },
        })
    }
}
