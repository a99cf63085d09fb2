use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::login_user::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "pw1")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginUserInfo {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "Alice")]
    name: String,
    #[schema(example = "alice@example.com")]
    email: String,
    #[schema(example = true)]
    is_verified: bool,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token (short-lived)
    access_token: String,
    /// JWT refresh token (long-lived)
    refresh_token: String,
    user: LoginUserInfo,
}

/// User login
///
/// Authenticates with email and password, returns JWT access and refresh tokens.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<LoginResponse>)),
        (
            status = 401,
            description = "Invalid credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "message": "Invalid email or password",
                "error": {
                    "code": "INVALID_CREDENTIALS",
                    "message": "Invalid email or password"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    info!(email = %dto.email, "Login attempt");

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(req) => req,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.auth.login.execute(request).await {
        Ok(response) => {
            info!(user_id = %response.user.id, "User logged in successfully");

            ApiResponse::success(LoginResponse {
                access_token: response.tokens.access_token,
                refresh_token: response.tokens.refresh_token,
                user: LoginUserInfo {
                    id: response.user.id.value(),
                    name: response.user.name,
                    email: response.user.email,
                    is_verified: response.user.is_verified,
                },
            })
        }

        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: Invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        Err(e) => {
            error!(error = %e, "Login failed");
            ApiResponse::internal_error()
        }
    }
}
