use async_trait::async_trait;

use crate::catalog::application::domain::CatalogSnapshot;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogSourceError {
    #[error("Shop {0} not found")]
    ShopNotFound(i32),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Storefront rejected the request with status {0}")]
    Rejected(u16),

    #[error("Unexpected catalog payload: {0}")]
    InvalidPayload(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Loads a shop's product catalog. Callers fetch once per request.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_snapshot(&self, shop_id: i32) -> Result<CatalogSnapshot, CatalogSourceError>;
}
