use std::sync::Arc;

use async_trait::async_trait;

use super::issue_token_pair;
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::auth::application::use_cases::refresh_token::{RefreshTokenError, RefreshTokenUseCase};
use crate::auth::application::use_cases::TokenPair;

/// Issues a fresh pair from a valid refresh token. Old tokens stay valid until they expire.
pub struct RefreshTokenService {
    token_provider: Arc<dyn TokenProvider>,
}

impl RefreshTokenService {
    pub fn new(token_provider: Arc<dyn TokenProvider>) -> Self {
        Self { token_provider }
    }
}

#[async_trait]
impl RefreshTokenUseCase for RefreshTokenService {
    async fn execute(&self, refresh_token: &str) -> Result<TokenPair, RefreshTokenError> {
        let claims = self.token_provider.verify_token(refresh_token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            RefreshTokenError::InvalidToken
        })?;

        if !claims.is_refresh() {
            tracing::warn!(token_type = %claims.token_type, "Non-refresh token presented for refresh");
            return Err(RefreshTokenError::InvalidToken);
        }

        issue_token_pair(self.token_provider.as_ref(), &claims.sub)
            .map_err(|e| RefreshTokenError::TokenGenerationFailed(e.to_string()))
    }
}
