use async_trait::async_trait;

use crate::subscription::application::domain::entities::PlanView;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanFilter {
    pub id: Option<i32>,
    pub include_frequencies: bool,
    pub include_products: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait PlanQuery: Send + Sync {
    /// Live plans of the shop ordered by id.
    async fn list_plans(
        &self,
        shop_id: i32,
        filter: PlanFilter,
    ) -> Result<Vec<PlanView>, PlanQueryError>;
}
