use std::sync::Arc;

use crate::subscription::application::ports::incoming::use_cases::{
    CreatePlanUseCase, CreateSubscriptionUseCase, ListPlansUseCase, ListSubscriptionsUseCase,
    ReceiveWebhookUseCase, UpdatePlanUseCase,
};

#[derive(Clone)]
pub struct SubscriptionUseCases {
    pub create_plan: Arc<dyn CreatePlanUseCase + Send + Sync>,
    pub update_plan: Arc<dyn UpdatePlanUseCase + Send + Sync>,
    pub list_plans: Arc<dyn ListPlansUseCase + Send + Sync>,
    pub create_subscription: Arc<dyn CreateSubscriptionUseCase + Send + Sync>,
    pub list_subscriptions: Arc<dyn ListSubscriptionsUseCase + Send + Sync>,
    pub receive_webhook: Arc<dyn ReceiveWebhookUseCase + Send + Sync>,
}
