use async_trait::async_trait;

use crate::subscription::application::domain::entities::Subscription;

#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub subscription_plan_id: i32,
    pub frequency_id: i32,
    pub product_id: i64,
    pub customer_id: Option<i64>,
    pub user_id: i32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateSubscriptionError {
    #[error("Subscription plan not found")]
    PlanNotFound,

    #[error("Frequency not found for plan")]
    FrequencyNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateSubscriptionUseCase: Send + Sync {
    async fn execute(
        &self,
        shop_id: i32,
        command: CreateSubscriptionCommand,
    ) -> Result<Subscription, CreateSubscriptionError>;
}
