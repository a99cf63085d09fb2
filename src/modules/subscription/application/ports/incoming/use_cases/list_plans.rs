use async_trait::async_trait;

use crate::subscription::application::domain::entities::PlanView;
use crate::subscription::application::ports::outgoing::PlanFilter;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListPlansError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListPlansUseCase: Send + Sync {
    async fn execute(&self, shop_id: i32, filter: PlanFilter)
        -> Result<Vec<PlanView>, ListPlansError>;
}
