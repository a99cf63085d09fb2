use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    resolve_caller_or_response, AuthenticatedUser,
};
use crate::shared::api::ApiResponse;
use crate::subscription::application::domain::entities::Subscription;
use crate::subscription::application::ports::incoming::use_cases::{
    CreateSubscriptionCommand, CreateSubscriptionError,
};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSubscriptionRequest {
    #[schema(example = 4)]
    pub subscription_plan_id: i32,
    #[schema(example = 8)]
    pub frequency_id: i32,
    #[schema(example = 632910392)]
    pub product_id: i64,
    /// Storefront customer id.
    #[schema(example = 7390182736054_i64)]
    pub customer_id: Option<i64>,
}

/// Subscribe to a plan
#[utoipa::path(
    post,
    path = "/api/v1/shops/{shop_id}/subscriptions",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    params(("shop_id" = i32, Path, description = "Shop id")),
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = inline(SuccessResponse<Subscription>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Plan or frequency not found", body = ErrorResponse),
    )
)]
#[post("/api/v1/shops/{shop_id}/subscriptions")]
pub async fn create_subscription_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    req: web::Json<CreateSubscriptionRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let caller = match resolve_caller_or_response(&data, &user).await {
        Ok(caller) => caller,
        Err(resp) => return resp,
    };

    let shop_id = path.into_inner();
    let dto = req.into_inner();
    let command = CreateSubscriptionCommand {
        subscription_plan_id: dto.subscription_plan_id,
        frequency_id: dto.frequency_id,
        product_id: dto.product_id,
        customer_id: dto.customer_id,
        user_id: caller.id.value(),
    };

    match data.subscription.create_subscription.execute(shop_id, command).await {
        Ok(subscription) => {
            info!(shop_id, subscription_id = subscription.id, caller = %caller.id, "Subscription created via API");
            ApiResponse::created("Subscription created", subscription)
        }
        Err(CreateSubscriptionError::PlanNotFound) => {
            ApiResponse::not_found("PLAN_NOT_FOUND", "Subscription plan not found")
        }
        Err(CreateSubscriptionError::FrequencyNotFound) => {
            ApiResponse::not_found("FREQUENCY_NOT_FOUND", "Frequency not found for plan")
        }
        Err(CreateSubscriptionError::RepositoryError(e)) => {
            error!(shop_id, error = %e, "Subscription creation failed");
            ApiResponse::internal_error()
        }
    }
}
