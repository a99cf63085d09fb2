use actix_web::{patch, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use super::{catalog_unavailable, invalid_reference, shop_not_found};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    require_superuser_or_response, AuthenticatedUser,
};
use crate::catalog::application::domain::ProductSelection;
use crate::shared::api::ApiResponse;
use crate::subscription::application::domain::entities::{
    DeleteProducts, FrequencyFields, FrequencyUpdate, Plan, PlanStatus, PlanUpdate,
};
use crate::subscription::application::ports::incoming::use_cases::UpdatePlanError;
use crate::AppState;

/// Partial update. Omitted fields are left as they are.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePlanRequest {
    pub name: Option<String>,
    pub status: Option<PlanStatus>,
    pub is_deleted: Option<bool>,
    #[serde(default)]
    pub delete_products: DeleteProducts,
    #[serde(default)]
    pub add_products: Vec<ProductSelection>,
    /// Ids of frequencies of this plan to remove
    #[serde(default)]
    pub removed_frequency: Vec<i32>,
    #[serde(default)]
    pub add_frequency: Vec<FrequencyFields>,
    #[serde(default)]
    pub update_frequency: Vec<FrequencyUpdate>,
}

impl From<UpdatePlanRequest> for PlanUpdate {
    fn from(dto: UpdatePlanRequest) -> Self {
        PlanUpdate {
            name: dto.name,
            status: dto.status,
            is_deleted: dto.is_deleted,
            delete_products: dto.delete_products,
            add_products: dto.add_products,
            removed_frequency: dto.removed_frequency,
            add_frequency: dto.add_frequency,
            update_frequency: dto.update_frequency,
        }
    }
}

/// Update a subscription plan
#[utoipa::path(
    patch,
    path = "/api/v1/shops/{shop_id}/subscription-plans/{plan_id}",
    tag = "subscription-plans",
    security(("bearer_auth" = [])),
    params(
        ("shop_id" = i32, Path, description = "Shop id"),
        ("plan_id" = i32, Path, description = "Plan id"),
    ),
    request_body = UpdatePlanRequest,
    responses(
        (status = 200, description = "Plan updated", body = inline(SuccessResponse<Plan>)),
        (status = 400, description = "Validation error or unknown catalog reference", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "Plan or frequency not found", body = ErrorResponse),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    )
)]
#[patch("/api/v1/shops/{shop_id}/subscription-plans/{plan_id}")]
pub async fn update_plan_handler(
    user: AuthenticatedUser,
    path: web::Path<(i32, i32)>,
    req: web::Json<UpdatePlanRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(resp) = require_superuser_or_response(&data, &user).await {
        return resp;
    }

    let (shop_id, plan_id) = path.into_inner();

    match data
        .subscription
        .update_plan
        .execute(shop_id, plan_id, req.into_inner().into())
        .await
    {
        Ok(plan) => ApiResponse::success_with_message("Subscription plan updated", plan),
        Err(UpdatePlanError::Validation(msg)) => ApiResponse::bad_request("VALIDATION_ERROR", &msg),
        Err(UpdatePlanError::InvalidReference(e)) => invalid_reference(&e),
        Err(UpdatePlanError::ShopNotFound) => shop_not_found(),
        Err(UpdatePlanError::CatalogUnavailable(reason)) => catalog_unavailable(&reason),
        Err(UpdatePlanError::PlanNotFound) => {
            ApiResponse::not_found("PLAN_NOT_FOUND", "Subscription plan not found")
        }
        Err(UpdatePlanError::FrequencyNotFound(id)) => ApiResponse::not_found(
            "FREQUENCY_NOT_FOUND",
            &format!("Frequency {} not found in plan", id),
        ),
        Err(UpdatePlanError::RepositoryError(e)) => {
            error!(shop_id, plan_id, error = %e, "Plan update failed");
            ApiResponse::internal_error()
        }
    }
}
