use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::register_user::{
    RegisterUserError, RegisterUserInput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "pw1")]
    pub password: String,
    /// Referral code of an existing user
    #[schema(example = "BOBX3K9QZA")]
    #[serde(default)]
    pub referral_code: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RegisteredUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub referral_code: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterUserResponse {
    pub user: RegisteredUser,
    pub access_token: String,
    pub refresh_token: String,
    pub referral_applied: bool,
}

/// Register a new account
///
/// Returns tokens right away; a verification code is emailed separately.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = inline(SuccessResponse<RegisterUserResponse>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let input = match RegisterUserInput::new(dto.name, dto.email, dto.password, dto.referral_code)
    {
        Ok(input) => input,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.auth.register.execute(input).await {
        Ok(output) => {
            info!(user_id = %output.user.id, "Registration completed");
            ApiResponse::created(
                "User registered successfully",
                RegisterUserResponse {
                    user: RegisteredUser {
                        id: output.user.id.value(),
                        name: output.user.name,
                        email: output.user.email,
                        is_verified: output.user.is_verified,
                        referral_code: output.user.referral_code,
                    },
                    access_token: output.tokens.access_token,
                    refresh_token: output.tokens.refresh_token,
                    referral_applied: output.referral_applied,
                },
            )
        }

        Err(RegisterUserError::UserAlreadyExists) => {
            warn!("Registration rejected: email already registered");
            ApiResponse::conflict("USER_ALREADY_EXISTS", "User with this email already exists")
        }

        Err(e) => {
            error!(error = %e, "Registration failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::auth::application::ports::outgoing::UserResult;
    use crate::auth::application::use_cases::register_user::{
        RegisterUserOutput, RegisterUserUseCase,
    };
    use crate::auth::application::use_cases::TokenPair;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct MockRegister(Result<(), RegisterUserError>);

    #[async_trait]
    impl RegisterUserUseCase for MockRegister {
        async fn execute(
            &self,
            input: RegisterUserInput,
        ) -> Result<RegisterUserOutput, RegisterUserError> {
            self.0.clone()?;
            Ok(RegisterUserOutput {
                user: UserResult {
                    id: UserId::from(1),
                    name: input.name().to_string(),
                    email: input.email().to_string(),
                    is_verified: false,
                    referral_code: Some("ALICQWERTY".to_string()),
                },
                tokens: TokenPair {
                    access_token: "access".to_string(),
                    refresh_token: "refresh".to_string(),
                },
                referral_applied: false,
            })
        }
    }

    async fn call(uc: MockRegister, body: serde_json::Value) -> (u16, serde_json::Value) {
        let state = TestAppStateBuilder::default().with_register_user(uc).build();
        let app = test::init_service(App::new().app_data(state).service(register_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_register_success() {
        let (status, body) = call(
            MockRegister(Ok(())),
            serde_json::json!({"name": "Alice", "email": "Alice@X.com", "password": "pw1"}),
        )
        .await;

        assert_eq!(status, 201);
        assert_eq!(body["data"]["user"]["email"], "alice@x.com");
        assert_eq!(body["data"]["access_token"], "access");
    }

    #[actix_web::test]
    async fn test_register_conflict() {
        let (status, body) = call(
            MockRegister(Err(RegisterUserError::UserAlreadyExists)),
            serde_json::json!({"name": "Alice", "email": "alice@x.com", "password": "pw1"}),
        )
        .await;

        assert_eq!(status, 409);
        assert_eq!(body["error"]["code"], "USER_ALREADY_EXISTS");
    }

    #[actix_web::test]
    async fn test_register_invalid_email() {
        let (status, body) = call(
            MockRegister(Ok(())),
            serde_json::json!({"name": "Alice", "email": "nope", "password": "pw1"}),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_register_internal_error_hides_cause() {
        let (status, body) = call(
            MockRegister(Err(RegisterUserError::RepositoryError(
                "relation users does not exist".to_string(),
            ))),
            serde_json::json!({"name": "Alice", "email": "alice@x.com", "password": "pw1"}),
        )
        .await;

        assert_eq!(status, 500);
        assert!(!body.to_string().contains("relation users"));
    }
}
