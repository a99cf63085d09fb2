use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::user_query::{UserQuery, UserQueryError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveUserIdError {
    #[error("User not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Identity of a token bearer as stored today.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedUser {
    pub id: UserId,
    pub is_superuser: bool,
}

/// Turns the email carried in a token into a live, non-deleted user.
#[derive(Clone)]
pub struct UserIdentityResolver {
    user_query: Arc<dyn UserQuery>,
}

impl UserIdentityResolver {
    pub fn new(user_query: Arc<dyn UserQuery>) -> Self {
        Self { user_query }
    }

    pub async fn by_email(&self, email: &str) -> Result<ResolvedUser, ResolveUserIdError> {
        match self.user_query.find_by_email(email).await {
            Ok(Some(user)) if !user.is_deleted => Ok(ResolvedUser {
                id: user.id,
                is_superuser: user.is_superuser,
            }),
            Ok(_) => Err(ResolveUserIdError::NotFound),
            Err(UserQueryError::DatabaseError(msg)) => Err(ResolveUserIdError::RepositoryError(msg)),
        }
    }
}
