use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, MessageResponse};
use crate::auth::application::use_cases::forgot_password::ForgotPasswordError;
use crate::auth::application::use_cases::normalize_email;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ForgotPasswordRequestDto {
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Request a password reset code
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    tag = "auth",
    request_body = ForgotPasswordRequestDto,
    responses(
        (status = 200, description = "Reset code sent", body = MessageResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/forgot-password")]
pub async fn forgot_password_handler(
    req: web::Json<ForgotPasswordRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let email = match normalize_email(&req.email) {
        Ok(email) => email,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.auth.forgot_password.execute(&email).await {
        Ok(()) => ApiResponse::ok_message("Password reset code sent"),
        Err(ForgotPasswordError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(error = %e, "Forgot password failed");
            ApiResponse::internal_error()
        }
    }
}
