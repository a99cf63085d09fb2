use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::subscription::application::domain::entities::PlanView;
use crate::subscription::application::ports::incoming::use_cases::ListPlansError;
use crate::subscription::application::ports::outgoing::PlanFilter;
use crate::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPlansQuery {
    /// Only this plan
    pub id: Option<i32>,
    /// Include frequencies
    #[serde(default)]
    pub frequency: bool,
    /// Include products and their variants
    #[serde(default)]
    pub products: bool,
}

/// List a shop's subscription plans
#[utoipa::path(
    get,
    path = "/api/v1/shops/{shop_id}/subscription-plans",
    tag = "subscription-plans",
    security(("bearer_auth" = [])),
    params(("shop_id" = i32, Path, description = "Shop id"), ListPlansQuery),
    responses(
        (status = 200, description = "Plans ordered by id", body = inline(SuccessResponse<Vec<PlanView>>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/api/v1/shops/{shop_id}/subscription-plans")]
pub async fn list_plans_handler(
    _user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ListPlansQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let shop_id = path.into_inner();
    let query = query.into_inner();
    let filter = PlanFilter {
        id: query.id,
        include_frequencies: query.frequency,
        include_products: query.products,
    };

    match data.subscription.list_plans.execute(shop_id, filter).await {
        Ok(plans) => ApiResponse::success(plans),
        Err(ListPlansError::RepositoryError(e)) => {
            error!(shop_id, error = %e, "Listing plans failed");
            ApiResponse::internal_error()
        }
    }
}
