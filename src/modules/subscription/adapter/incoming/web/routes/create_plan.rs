use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::ToSchema;

use super::{catalog_unavailable, invalid_reference, shop_not_found};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    require_superuser_or_response, AuthenticatedUser,
};
use crate::catalog::application::domain::ProductSelection;
use crate::shared::api::ApiResponse;
use crate::subscription::application::domain::entities::{FrequencyFields, Plan, PlanStatus};
use crate::subscription::application::ports::incoming::use_cases::{
    CreatePlanCommand, CreatePlanError,
};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePlanRequest {
    #[schema(example = "Coffee Club")]
    pub name: String,
    #[serde(default)]
    pub status: PlanStatus,
    #[serde(default)]
    pub frequencies: Vec<FrequencyFields>,
    #[serde(default)]
    pub products: Vec<ProductSelection>,
}

/// Create a subscription plan
///
/// Every product and variant must exist in the shop's catalog.
#[utoipa::path(
    post,
    path = "/api/v1/shops/{shop_id}/subscription-plans",
    tag = "subscription-plans",
    security(("bearer_auth" = [])),
    params(("shop_id" = i32, Path, description = "Shop id")),
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Plan created", body = inline(SuccessResponse<Plan>)),
        (status = 400, description = "Validation error or unknown catalog reference", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "Shop not found", body = ErrorResponse),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    )
)]
#[post("/api/v1/shops/{shop_id}/subscription-plans")]
pub async fn create_plan_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    req: web::Json<CreatePlanRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(resp) = require_superuser_or_response(&data, &user).await {
        return resp;
    }

    let shop_id = path.into_inner();
    let dto = req.into_inner();
    let command = CreatePlanCommand {
        name: dto.name,
        status: dto.status,
        frequencies: dto.frequencies,
        products: dto.products,
    };

    match data.subscription.create_plan.execute(shop_id, command).await {
        Ok(plan) => {
            info!(shop_id, plan_id = plan.id, "Plan created via API");
            ApiResponse::created("Subscription plan created", plan)
        }
        Err(CreatePlanError::Validation(msg)) => ApiResponse::bad_request("VALIDATION_ERROR", &msg),
        Err(CreatePlanError::InvalidReference(e)) => invalid_reference(&e),
        Err(CreatePlanError::ShopNotFound) => shop_not_found(),
        Err(CreatePlanError::CatalogUnavailable(reason)) => catalog_unavailable(&reason),
        Err(CreatePlanError::RepositoryError(e)) => {
            error!(shop_id, error = %e, "Plan creation failed");
            ApiResponse::internal_error()
        }
    }
}
