use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub referral_code: String,
    /// Written as a referral edge in the same transaction as the user row.
    pub referred_by: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserResult {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Referral code already taken")]
    ReferralCodeTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, data: CreateUserData) -> Result<UserResult, UserRepositoryError>;
    async fn mark_verified(&self, user_id: UserId) -> Result<(), UserRepositoryError>;
    async fn update_password(
        &self,
        user_id: UserId,
        password_hash: String,
    ) -> Result<(), UserRepositoryError>;
}
