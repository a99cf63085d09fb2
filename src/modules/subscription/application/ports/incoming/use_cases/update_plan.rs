use async_trait::async_trait;

use crate::catalog::application::domain::CatalogError;
use crate::subscription::application::domain::entities::{Plan, PlanUpdate};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdatePlanError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid catalog reference: {0}")]
    InvalidReference(CatalogError),

    #[error("Shop not found")]
    ShopNotFound,

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Subscription plan not found")]
    PlanNotFound,

    #[error("Frequency {0} not found in plan")]
    FrequencyNotFound(i32),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UpdatePlanUseCase: Send + Sync {
    async fn execute(
        &self,
        shop_id: i32,
        plan_id: i32,
        update: PlanUpdate,
    ) -> Result<Plan, UpdatePlanError>;
}
