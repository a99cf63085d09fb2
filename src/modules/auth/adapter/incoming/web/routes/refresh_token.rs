use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::refresh_token::RefreshTokenError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenRequestDto {
    pub refresh_token: String,
}

#[derive(Serialize, ToSchema)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "auth",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "New token pair", body = inline(SuccessResponse<TokenPairResponse>)),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/refresh")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshTokenRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.refresh_token.execute(&req.refresh_token).await {
        Ok(pair) => ApiResponse::success(TokenPairResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
        Err(RefreshTokenError::InvalidToken) => {
            warn!("Refresh rejected");
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid or expired refresh token")
        }
        Err(RefreshTokenError::TokenGenerationFailed(e)) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }
    }
}
