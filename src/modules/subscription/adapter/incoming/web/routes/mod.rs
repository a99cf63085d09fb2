pub mod create_plan;
pub mod create_subscription;
pub mod list_plans;
pub mod list_subscriptions;
pub mod update_plan;
pub mod webhook;

pub use create_plan::*;
pub use create_subscription::*;
pub use list_plans::*;
pub use list_subscriptions::*;
pub use update_plan::*;
pub use webhook::*;

use actix_web::HttpResponse;

use crate::catalog::application::domain::CatalogError;
use crate::shared::api::ApiResponse;

pub(crate) fn invalid_reference(e: &CatalogError) -> HttpResponse {
    tracing::warn!(offending_id = e.offending_id(), "Plan references unknown catalog item");
    ApiResponse::bad_request("INVALID_REFERENCE", &e.to_string())
}

pub(crate) fn catalog_unavailable(reason: &str) -> HttpResponse {
    tracing::error!(reason, "Catalog unavailable while validating plan");
    ApiResponse::bad_gateway("CATALOG_UNAVAILABLE", "Product catalog is temporarily unavailable")
}

pub(crate) fn shop_not_found() -> HttpResponse {
    ApiResponse::not_found("SHOP_NOT_FOUND", "Shop not found")
}
