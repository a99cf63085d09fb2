pub mod retry;
pub mod sea_orm_entity;
pub mod shopify_catalog;

pub use retry::RetryPolicy;
pub use shopify_catalog::ShopifyCatalogSource;
