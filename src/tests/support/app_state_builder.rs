use std::sync::Arc;

use actix_web::web;

use crate::auth::application::auth_use_cases::AuthUseCases;
use crate::auth::application::helpers::UserIdentityResolver;
use crate::auth::application::use_cases::{
    fetch_profile::FetchUserProfileUseCase, forgot_password::ForgotPasswordUseCase,
    login_user::LoginUserUseCase, refresh_token::RefreshTokenUseCase,
    register_user::RegisterUserUseCase, reset_password::ResetPasswordUseCase,
    verify_account::VerifyAccountUseCase,
};
use crate::subscription::application::ports::incoming::use_cases::{
    CreatePlanUseCase, CreateSubscriptionUseCase, ListPlansUseCase, ListSubscriptionsUseCase,
    ReceiveWebhookUseCase, UpdatePlanUseCase,
};
use crate::subscription::application::subscription_use_cases::SubscriptionUseCases;
use crate::tests::support::in_memory::InMemoryUsers;
use crate::tests::support::stubs::Unconfigured;
use crate::AppState;

/// Assembles an [`AppState`] where every use case not set explicitly is [`Unconfigured`].
pub struct TestAppStateBuilder {
    auth: AuthUseCases,
    subscription: SubscriptionUseCases,
    users: InMemoryUsers,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        let stub = Arc::new(Unconfigured);
        Self {
            auth: AuthUseCases {
                register: stub.clone(),
                login: stub.clone(),
                verify_account: stub.clone(),
                forgot_password: stub.clone(),
                reset_password: stub.clone(),
                refresh_token: stub.clone(),
                fetch_profile: stub.clone(),
            },
            subscription: SubscriptionUseCases {
                create_plan: stub.clone(),
                update_plan: stub.clone(),
                list_plans: stub.clone(),
                create_subscription: stub.clone(),
                list_subscriptions: stub.clone(),
                receive_webhook: stub,
            },
            users: InMemoryUsers::default(),
        }
    }
}

impl TestAppStateBuilder {
    /// Backs the caller resolver used by authenticated routes.
    pub fn with_users(mut self, users: InMemoryUsers) -> Self {
        self.users = users;
        self
    }

    pub fn with_register_user(mut self, uc: impl RegisterUserUseCase + 'static) -> Self {
        self.auth.register = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl LoginUserUseCase + 'static) -> Self {
        self.auth.login = Arc::new(uc);
        self
    }

    pub fn with_verify_account(mut self, uc: impl VerifyAccountUseCase + 'static) -> Self {
        self.auth.verify_account = Arc::new(uc);
        self
    }

    pub fn with_forgot_password(mut self, uc: impl ForgotPasswordUseCase + 'static) -> Self {
        self.auth.forgot_password = Arc::new(uc);
        self
    }

    pub fn with_reset_password(mut self, uc: impl ResetPasswordUseCase + 'static) -> Self {
        self.auth.reset_password = Arc::new(uc);
        self
    }

    pub fn with_refresh_token(mut self, uc: impl RefreshTokenUseCase + 'static) -> Self {
        self.auth.refresh_token = Arc::new(uc);
        self
    }

    pub fn with_fetch_user_profile(mut self, uc: impl FetchUserProfileUseCase + 'static) -> Self {
        self.auth.fetch_profile = Arc::new(uc);
        self
    }

    pub fn with_create_plan(mut self, uc: impl CreatePlanUseCase + 'static) -> Self {
        self.subscription.create_plan = Arc::new(uc);
        self
    }

    pub fn with_update_plan(mut self, uc: impl UpdatePlanUseCase + 'static) -> Self {
        self.subscription.update_plan = Arc::new(uc);
        self
    }

    pub fn with_list_plans(mut self, uc: impl ListPlansUseCase + 'static) -> Self {
        self.subscription.list_plans = Arc::new(uc);
        self
    }

    pub fn with_create_subscription(mut self, uc: impl CreateSubscriptionUseCase + 'static) -> Self {
        self.subscription.create_subscription = Arc::new(uc);
        self
    }

    pub fn with_list_subscriptions(mut self, uc: impl ListSubscriptionsUseCase + 'static) -> Self {
        self.subscription.list_subscriptions = Arc::new(uc);
        self
    }

    pub fn with_receive_webhook(mut self, uc: impl ReceiveWebhookUseCase + 'static) -> Self {
        self.subscription.receive_webhook = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            auth: self.auth,
            subscription: self.subscription,
            user_identity_resolver: UserIdentityResolver::new(Arc::new(self.users)),
        })
    }
}
