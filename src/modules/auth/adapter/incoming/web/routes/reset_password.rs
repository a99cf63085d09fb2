use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, MessageResponse};
use crate::auth::application::use_cases::reset_password::{
    ResetPasswordError, ResetPasswordRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ResetPasswordRequestDto {
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "aB3dE5gH7j")]
    pub code: String,
    #[schema(example = "new-password")]
    pub new_password: String,
}

/// Reset the password with an emailed code
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    tag = "auth",
    request_body = ResetPasswordRequestDto,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Unknown user or code", body = ErrorResponse),
        (status = 410, description = "Code expired", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/reset-password")]
pub async fn reset_password_handler(
    req: web::Json<ResetPasswordRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match ResetPasswordRequest::new(dto.email, dto.code, dto.new_password) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.auth.reset_password.execute(request).await {
        Ok(()) => {
            info!("Password reset completed");
            ApiResponse::ok_message("Password updated")
        }
        Err(ResetPasswordError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(ResetPasswordError::CodeNotFound) => {
            ApiResponse::not_found("CODE_NOT_FOUND", "Reset code not found")
        }
        Err(ResetPasswordError::CodeExpired) => {
            ApiResponse::gone("CODE_EXPIRED", "Reset code has expired")
        }
        Err(e) => {
            error!(error = %e, "Password reset failed");
            ApiResponse::internal_error()
        }
    }
}
