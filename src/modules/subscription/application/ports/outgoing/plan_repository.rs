use async_trait::async_trait;

use crate::subscription::application::domain::entities::{NewPlan, Plan, PlanUpdate};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanRepositoryError {
    #[error("Shop not found")]
    ShopNotFound,

    #[error("Subscription plan not found")]
    PlanNotFound,

    #[error("Frequency {0} does not belong to the plan")]
    FrequencyNotFound(i32),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Writes plans and their nested rows. Each call is one transaction.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Fails with `ShopNotFound` when the shop is missing or soft-deleted.
    async fn create_plan(&self, plan: NewPlan) -> Result<Plan, PlanRepositoryError>;

    /// Checks the plan and every referenced frequency before the first write.
    async fn update_plan(
        &self,
        shop_id: i32,
        plan_id: i32,
        update: PlanUpdate,
    ) -> Result<Plan, PlanRepositoryError>;
}
