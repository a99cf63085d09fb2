use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, MessageResponse};
use crate::auth::application::use_cases::verify_account::{
    VerifyAccountError, VerifyAccountOutcome, VerifyAccountRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct VerifyAccountRequestDto {
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Code from the verification email
    #[schema(example = "aB3dE5gH7j")]
    pub code: String,
}

/// Verify an account with the emailed code
///
/// Verifying an already verified account succeeds without consuming anything.
#[utoipa::path(
    post,
    path = "/api/v1/auth/verify-account",
    tag = "auth",
    request_body = VerifyAccountRequestDto,
    responses(
        (status = 200, description = "Account verified", body = MessageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Unknown user or code", body = ErrorResponse),
        (status = 410, description = "Code expired", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/verify-account")]
pub async fn verify_account_handler(
    req: web::Json<VerifyAccountRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match VerifyAccountRequest::new(dto.email, dto.code) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.auth.verify_account.execute(request).await {
        Ok(VerifyAccountOutcome::Verified) => ApiResponse::ok_message("Account verified"),
        Ok(VerifyAccountOutcome::AlreadyVerified) => {
            ApiResponse::ok_message("Account already verified")
        }
        Err(VerifyAccountError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(VerifyAccountError::CodeNotFound) => {
            ApiResponse::not_found("CODE_NOT_FOUND", "Verification code not found")
        }
        Err(VerifyAccountError::CodeExpired) => {
            ApiResponse::gone("CODE_EXPIRED", "Verification code has expired")
        }
        Err(VerifyAccountError::RepositoryError(e)) => {
            error!(error = %e, "Account verification failed");
            ApiResponse::internal_error()
        }
    }
}
