use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::subscription::application::domain::entities::Subscription;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListSubscriptionsRequest {
    pub caller: UserId,
    pub is_admin: bool,
    pub shop_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListSubscriptionsError {
    #[error("Only administrators may list a shop's subscriptions")]
    Forbidden,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListSubscriptionsUseCase: Send + Sync {
    async fn execute(
        &self,
        request: ListSubscriptionsRequest,
    ) -> Result<Vec<Subscription>, ListSubscriptionsError>;
}
