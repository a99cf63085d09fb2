use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::use_cases::fetch_profile::FetchUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct UserProfileResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub is_verified: bool,
    #[schema(example = "ALICX7Q2MZ")]
    pub referral_code: Option<String>,
}

/// Current user profile
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the bearer", body = inline(SuccessResponse<UserProfileResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[get("/api/v1/auth/me")]
pub async fn get_user_profile_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.fetch_profile.execute(&user.email).await {
        Ok(profile) => ApiResponse::success(UserProfileResponse {
            id: profile.user_id.value(),
            name: profile.name,
            email: profile.email,
            is_verified: profile.is_verified,
            referral_code: profile.referral_code,
        }),
        Err(FetchUserError::UserNotFound(_)) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(FetchUserError::QueryError(e)) => {
            error!(error = %e, "Failed to load profile");
            ApiResponse::internal_error()
        }
    }
}
