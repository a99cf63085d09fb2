use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::subscription::application::domain::entities::{NewSubscription, Subscription};
use crate::subscription::application::ports::incoming::use_cases::{
    CreateSubscriptionCommand, CreateSubscriptionError, CreateSubscriptionUseCase,
};
use crate::subscription::application::ports::outgoing::{
    SubscriptionRepository, SubscriptionRepositoryError,
};

pub struct CreateSubscriptionService {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl CreateSubscriptionService {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }
}

#[async_trait]
impl CreateSubscriptionUseCase for CreateSubscriptionService {
    async fn execute(
        &self,
        shop_id: i32,
        command: CreateSubscriptionCommand,
    ) -> Result<Subscription, CreateSubscriptionError> {
        let subscription = self
            .subscriptions
            .create_subscription(NewSubscription {
                shop_id,
                subscription_plan_id: command.subscription_plan_id,
                frequency_id: command.frequency_id,
                product_id: command.product_id,
                customer_id: command.customer_id,
                user_id: command.user_id,
            })
            .await
            .map_err(|e| match e {
                SubscriptionRepositoryError::PlanNotFound => CreateSubscriptionError::PlanNotFound,
                SubscriptionRepositoryError::FrequencyNotFound => {
                    CreateSubscriptionError::FrequencyNotFound
                }
                SubscriptionRepositoryError::DatabaseError(msg) => {
                    error!(shop_id, error = %msg, "Failed to create subscription");
                    CreateSubscriptionError::RepositoryError(msg)
                }
            })?;

        info!(
            shop_id,
            subscription_id = subscription.id,
            plan_id = subscription.subscription_plan_id,
            "Subscription created"
        );
        Ok(subscription)
    }
}
