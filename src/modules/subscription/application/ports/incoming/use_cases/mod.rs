mod create_plan;
mod create_subscription;
mod list_plans;
mod list_subscriptions;
mod receive_webhook;
mod update_plan;

pub use create_plan::{CreatePlanCommand, CreatePlanError, CreatePlanUseCase};
pub use create_subscription::{
    CreateSubscriptionCommand, CreateSubscriptionError, CreateSubscriptionUseCase,
};
pub use list_plans::{ListPlansError, ListPlansUseCase};
pub use list_subscriptions::{
    ListSubscriptionsError, ListSubscriptionsRequest, ListSubscriptionsUseCase,
};
pub use receive_webhook::{
    ContractEvent, ReceiveWebhookError, ReceiveWebhookUseCase, WEBHOOK_SIGNATURE_HEADER,
};
pub use update_plan::{UpdatePlanError, UpdatePlanUseCase};
