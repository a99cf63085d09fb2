use async_trait::async_trait;

use crate::auth::application::{
    domain::entities::UserId, ports::outgoing::user_query::UserQueryError,
};

#[derive(Clone, Debug)]
pub struct FetchUserOutput {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub referral_code: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone)]
pub enum FetchUserError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),
}

#[async_trait]
pub trait FetchUserProfileUseCase: Send + Sync {
    /// Looks the bearer up by the email carried in their token.
    async fn execute(&self, email: &str) -> Result<FetchUserOutput, FetchUserError>;
}
