pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;
pub use modules::auth;
pub use modules::catalog;
pub use modules::email;
pub use modules::subscription;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::JwtTokenService;
use crate::auth::adapter::outgoing::security::BcryptHasher;
use crate::auth::adapter::outgoing::{
    UserQueryPostgres, UserRepositoryPostgres, VerificationCodeRepositoryPostgres,
};
use crate::auth::application::auth_use_cases::AuthUseCases;
use crate::auth::application::helpers::UserIdentityResolver;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, UserQuery, UserRepository,
};
use crate::auth::application::services::account::{
    FetchUserProfileService, ForgotPasswordService, LoginUserService, RefreshTokenService,
    RegisterUserService, ResetPasswordService, VerifyAccountService,
};
use crate::auth::application::services::VerificationCodeService;
use crate::catalog::adapter::outgoing::{RetryPolicy, ShopifyCatalogSource};
use crate::catalog::application::ports::outgoing::CatalogSource;
use crate::config::{AppConfig, EmailTransport};
use crate::email::adapter::outgoing::{LogEmailSender, SmtpEmailSender};
use crate::email::application::ports::outgoing::{AccountNotifier, EmailSender};
use crate::email::application::services::AccountEmailService;
use crate::subscription::adapter::outgoing::{
    PlanQueryPostgres, PlanRepositoryPostgres, SubscriptionRepositoryPostgres,
};
use crate::subscription::application::ports::outgoing::{PlanRepository, SubscriptionRepository};
use crate::subscription::application::services::{
    CreatePlanService, CreateSubscriptionService, ListPlansService, ListSubscriptionsService,
    ReceiveWebhookService, UpdatePlanService, WebhookSignatureVerifier,
};
use crate::subscription::application::subscription_use_cases::SubscriptionUseCases;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthUseCases,
    pub subscription: SubscriptionUseCases,
    pub user_identity_resolver: UserIdentityResolver,
}

#[actix_web::main]
#[cfg(not(any(test, tarpaulin_include)))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let server_url = config.server_url();

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(50)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .map_err(std::io::Error::other)?;
    let db_arc = Arc::new(conn.clone());

    // Outgoing adapters
    let email_sender: Arc<dyn EmailSender> = match &config.email.transport {
        EmailTransport::Smtp {
            server,
            username,
            password,
        } => Arc::new(
            SmtpEmailSender::new(server, username, password, &config.email.from_email)
                .map_err(std::io::Error::other)?,
        ),
        EmailTransport::Log => Arc::new(LogEmailSender),
    };
    let notifier: Arc<dyn AccountNotifier> = Arc::new(AccountEmailService::new(
        email_sender,
        config.frontend_url.clone(),
    ));

    let jwt_service = Arc::new(JwtTokenService::new(config.jwt.clone()));
    let token_provider: Arc<dyn TokenProvider> = jwt_service.clone();
    let bearer_tokens: Arc<dyn TokenProvider + Send + Sync> = jwt_service;
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::default());

    let user_query: Arc<dyn UserQuery> = Arc::new(UserQueryPostgres::new(Arc::clone(&db_arc)));
    let user_repo: Arc<dyn UserRepository> =
        Arc::new(UserRepositoryPostgres::new(Arc::clone(&db_arc)));
    let verification_codes = VerificationCodeService::new(
        Arc::new(VerificationCodeRepositoryPostgres::new(Arc::clone(&db_arc))),
        config.verification_code_ttl_minutes,
    );

    let catalog: Arc<dyn CatalogSource> = Arc::new(
        ShopifyCatalogSource::new(
            Arc::clone(&db_arc),
            config.shopify.api_version.clone(),
            RetryPolicy::new(
                config.shopify.max_attempts,
                Duration::from_millis(config.shopify.base_delay_ms),
            ),
        )
        .map_err(std::io::Error::other)?,
    );
    let plans: Arc<dyn PlanRepository> =
        Arc::new(PlanRepositoryPostgres::new(Arc::clone(&db_arc)));
    let subscriptions: Arc<dyn SubscriptionRepository> =
        Arc::new(SubscriptionRepositoryPostgres::new(Arc::clone(&db_arc)));

    // Use cases
    let auth = AuthUseCases {
        register: Arc::new(RegisterUserService::new(
            user_query.clone(),
            user_repo.clone(),
            password_hasher.clone(),
            token_provider.clone(),
            verification_codes.clone(),
            notifier.clone(),
        )),
        login: Arc::new(LoginUserService::new(
            user_query.clone(),
            password_hasher.clone(),
            token_provider.clone(),
        )),
        verify_account: Arc::new(VerifyAccountService::new(
            user_query.clone(),
            user_repo.clone(),
            verification_codes.clone(),
        )),
        forgot_password: Arc::new(ForgotPasswordService::new(
            user_query.clone(),
            verification_codes.clone(),
            notifier,
        )),
        reset_password: Arc::new(ResetPasswordService::new(
            user_query.clone(),
            user_repo,
            password_hasher,
            verification_codes,
        )),
        refresh_token: Arc::new(RefreshTokenService::new(token_provider.clone())),
        fetch_profile: Arc::new(FetchUserProfileService::new(user_query.clone())),
    };

    let subscription = SubscriptionUseCases {
        create_plan: Arc::new(CreatePlanService::new(catalog.clone(), plans.clone())),
        update_plan: Arc::new(UpdatePlanService::new(catalog, plans)),
        list_plans: Arc::new(ListPlansService::new(Arc::new(PlanQueryPostgres::new(
            Arc::clone(&db_arc),
        )))),
        create_subscription: Arc::new(CreateSubscriptionService::new(subscriptions.clone())),
        list_subscriptions: Arc::new(ListSubscriptionsService::new(subscriptions)),
        receive_webhook: Arc::new(ReceiveWebhookService::new(WebhookSignatureVerifier::new(
            config.shopify.webhook_secret.clone(),
        ))),
    };

    let state = AppState {
        auth,
        subscription,
        user_identity_resolver: UserIdentityResolver::new(user_query),
    };

    info!("Server running on: {}", server_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&bearer_tokens)))
            .app_data(web::Data::new(conn.clone()))
            .app_data(crate::shared::api::custom_json_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(any(test, tarpaulin_include)))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_account_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::forgot_password_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::reset_password_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::refresh_token_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::get_user_profile_handler);
    // Subscription plans
    cfg.service(crate::subscription::adapter::incoming::web::routes::create_plan_handler);
    cfg.service(crate::subscription::adapter::incoming::web::routes::update_plan_handler);
    cfg.service(crate::subscription::adapter::incoming::web::routes::list_plans_handler);
    // Subscriptions
    cfg.service(crate::subscription::adapter::incoming::web::routes::create_subscription_handler);
    cfg.service(crate::subscription::adapter::incoming::web::routes::list_subscriptions_handler);
    cfg.service(crate::subscription::adapter::incoming::web::routes::subscription_webhook_handler);
}

#[cfg(not(any(test, tarpaulin_include)))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
        std::process::exit(1);
    }
}
