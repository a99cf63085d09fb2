use async_trait::async_trait;

use crate::catalog::application::domain::{CatalogError, ProductSelection};
use crate::subscription::application::domain::entities::{FrequencyFields, Plan, PlanStatus};

#[derive(Debug, Clone)]
pub struct CreatePlanCommand {
    pub name: String,
    pub status: PlanStatus,
    pub frequencies: Vec<FrequencyFields>,
    pub products: Vec<ProductSelection>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreatePlanError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid catalog reference: {0}")]
    InvalidReference(CatalogError),

    #[error("Shop not found")]
    ShopNotFound,

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreatePlanUseCase: Send + Sync {
    async fn execute(&self, shop_id: i32, command: CreatePlanCommand)
        -> Result<Plan, CreatePlanError>;
}
