// application/ports/outgoing/user_query.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::UserId;

/// Read model for a user row.
#[derive(Debug, Clone)]
pub struct UserQueryResult {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub referral_code: Option<String>,
    pub is_superuser: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserQueryResult>, UserQueryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserQueryResult>, UserQueryError>;
    async fn find_by_referral_code(
        &self,
        referral_code: &str,
    ) -> Result<Option<UserQueryResult>, UserQueryError>;
    async fn referral_code_exists(&self, referral_code: &str) -> Result<bool, UserQueryError>;
}
