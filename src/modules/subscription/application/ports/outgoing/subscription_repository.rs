use async_trait::async_trait;

use crate::subscription::application::domain::entities::{
    NewSubscription, Subscription, SubscriptionScope,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubscriptionRepositoryError {
    #[error("Subscription plan not found")]
    PlanNotFound,

    #[error("Frequency not found for plan")]
    FrequencyNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Verifies plan and frequency ownership and inserts in one transaction.
    async fn create_subscription(
        &self,
        data: NewSubscription,
    ) -> Result<Subscription, SubscriptionRepositoryError>;

    async fn list_subscriptions(
        &self,
        scope: SubscriptionScope,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError>;
}
