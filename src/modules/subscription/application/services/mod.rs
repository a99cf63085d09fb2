pub mod create_plan_service;
pub mod create_subscription_service;
pub mod list_plans_service;
pub mod list_subscriptions_service;
pub mod receive_webhook_service;
pub mod update_plan_service;
pub mod webhook_signature;

pub use create_plan_service::CreatePlanService;
pub use create_subscription_service::CreateSubscriptionService;
pub use list_plans_service::ListPlansService;
pub use list_subscriptions_service::ListSubscriptionsService;
pub use receive_webhook_service::ReceiveWebhookService;
pub use update_plan_service::UpdatePlanService;
pub use webhook_signature::WebhookSignatureVerifier;

use crate::catalog::application::domain::{CatalogError, ProductSelection};
use crate::catalog::application::ports::outgoing::{CatalogSource, CatalogSourceError};

#[derive(Debug)]
pub(crate) enum CatalogCheckError {
    Invalid(CatalogError),
    ShopNotFound,
    Unavailable(String),
}

/// Validates ids against a single snapshot fetched for this call.
pub(crate) async fn check_catalog(
    catalog: &dyn CatalogSource,
    shop_id: i32,
    product_ids: &[i64],
    variant_ids: &[i64],
    selections: &[ProductSelection],
) -> Result<(), CatalogCheckError> {
    let snapshot = catalog.fetch_snapshot(shop_id).await.map_err(|e| match e {
        CatalogSourceError::ShopNotFound(_) => CatalogCheckError::ShopNotFound,
        other => {
            tracing::error!(shop_id, error = %other, "Catalog lookup failed");
            CatalogCheckError::Unavailable(other.to_string())
        }
    })?;

    snapshot
        .validate_products_and_variants(product_ids, variant_ids)
        .and_then(|_| snapshot.validate_product_inputs(selections))
        .map_err(|e| {
            tracing::warn!(shop_id, offending_id = e.offending_id(), "Catalog reference rejected");
            CatalogCheckError::Invalid(e)
        })
}
