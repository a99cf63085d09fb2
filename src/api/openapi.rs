use crate::api::schemas::{ErrorDetail, ErrorResponse, MessageResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

// Auth
use crate::auth::adapter::incoming::web::routes::{
    ForgotPasswordRequestDto, LoginRequestDto, LoginResponse, LoginUserInfo,
    RefreshTokenRequestDto, RegisterUserRequest, RegisterUserResponse, RegisteredUser,
    ResetPasswordRequestDto, TokenPairResponse, UserProfileResponse, VerifyAccountRequestDto,
};

// Subscription
use crate::catalog::application::domain::ProductSelection;
use crate::subscription::adapter::incoming::web::routes::{
    CreatePlanRequest, CreateSubscriptionRequest, UpdatePlanRequest,
};
use crate::subscription::application::domain::entities::{
    DeleteProducts, DiscountType, Frequency, FrequencyFields, FrequencyInterval, FrequencyType,
    FrequencyUpdate, InventoryPolicy, Plan, PlanProduct, PlanStatus, PlanType, PlanView,
    Subscription, SubscriptionStatus,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Subscription Commerce API",
        version = "1.0.0",
        description = "Accounts, subscription plans and subscriptions for storefront shops",
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::verify_account_handler,
        crate::auth::adapter::incoming::web::routes::forgot_password_handler,
        crate::auth::adapter::incoming::web::routes::reset_password_handler,
        crate::auth::adapter::incoming::web::routes::refresh_token_handler,
        crate::auth::adapter::incoming::web::routes::get_user_profile_handler,

        // Plan endpoints
        crate::subscription::adapter::incoming::web::routes::create_plan_handler,
        crate::subscription::adapter::incoming::web::routes::update_plan_handler,
        crate::subscription::adapter::incoming::web::routes::list_plans_handler,

        // Subscription endpoints
        crate::subscription::adapter::incoming::web::routes::create_subscription_handler,
        crate::subscription::adapter::incoming::web::routes::list_subscriptions_handler,
        crate::subscription::adapter::incoming::web::routes::subscription_webhook_handler,
    ),
    components(
        schemas(
            // Response wrappers
            MessageResponse,
            ErrorResponse,
            ErrorDetail,

            // Auth DTOs
            RegisterUserRequest,
            RegisterUserResponse,
            RegisteredUser,
            LoginRequestDto,
            LoginResponse,
            LoginUserInfo,
            VerifyAccountRequestDto,
            ForgotPasswordRequestDto,
            ResetPasswordRequestDto,
            RefreshTokenRequestDto,
            TokenPairResponse,
            UserProfileResponse,

            // Plans
            CreatePlanRequest,
            UpdatePlanRequest,
            Plan,
            PlanView,
            PlanProduct,
            PlanStatus,
            PlanType,
            Frequency,
            FrequencyFields,
            FrequencyUpdate,
            FrequencyInterval,
            FrequencyType,
            DiscountType,
            InventoryPolicy,
            DeleteProducts,
            ProductSelection,

            // Subscriptions
            CreateSubscriptionRequest,
            Subscription,
            SubscriptionStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Account and token endpoints"),
        (name = "subscription-plans", description = "Subscription plan management"),
        (name = "subscriptions", description = "Customer subscriptions"),
        (name = "webhooks", description = "Signed storefront callbacks"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from login or register"))
                        .build(),
                ),
            )
        }
    }
}
