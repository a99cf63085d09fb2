//! Placeholder use cases for routes a test does not exercise.

use async_trait::async_trait;

use crate::auth::application::use_cases::fetch_profile::{
    FetchUserError, FetchUserOutput, FetchUserProfileUseCase,
};
use crate::auth::application::use_cases::forgot_password::{
    ForgotPasswordError, ForgotPasswordUseCase,
};
use crate::auth::application::use_cases::login_user::{
    LoginError, LoginRequest, LoginUserResponse, LoginUserUseCase,
};
use crate::auth::application::use_cases::refresh_token::{RefreshTokenError, RefreshTokenUseCase};
use crate::auth::application::use_cases::register_user::{
    RegisterUserError, RegisterUserInput, RegisterUserOutput, RegisterUserUseCase,
};
use crate::auth::application::use_cases::reset_password::{
    ResetPasswordError, ResetPasswordRequest, ResetPasswordUseCase,
};
use crate::auth::application::use_cases::verify_account::{
    VerifyAccountError, VerifyAccountOutcome, VerifyAccountRequest, VerifyAccountUseCase,
};
use crate::auth::application::use_cases::TokenPair;
use crate::subscription::application::domain::entities::{Plan, PlanUpdate, PlanView, Subscription};
use crate::subscription::application::ports::incoming::use_cases::{
    ContractEvent, CreatePlanCommand, CreatePlanError, CreatePlanUseCase,
    CreateSubscriptionCommand, CreateSubscriptionError, CreateSubscriptionUseCase,
    ListPlansError, ListPlansUseCase, ListSubscriptionsError, ListSubscriptionsRequest,
    ListSubscriptionsUseCase, ReceiveWebhookError, ReceiveWebhookUseCase, UpdatePlanError,
    UpdatePlanUseCase,
};
use crate::subscription::application::ports::outgoing::PlanFilter;

const UNCONFIGURED: &str = "use case not configured for this test";

/// Fails every call with the use case's storage-style error.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

#[async_trait]
impl RegisterUserUseCase for Unconfigured {
    async fn execute(&self, _: RegisterUserInput) -> Result<RegisterUserOutput, RegisterUserError> {
        Err(RegisterUserError::RepositoryError(UNCONFIGURED.to_string()))
    }
}

#[async_trait]
impl LoginUserUseCase for Unconfigured {
    async fn execute(&self, _: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        Err(LoginError::QueryError(UNCONFIGURED.to_string()))
    }
}

#[async_trait]
impl VerifyAccountUseCase for Unconfigured {
    async fn execute(
        &self,
        _: VerifyAccountRequest,
    ) -> Result<VerifyAccountOutcome, VerifyAccountError> {
        Err(VerifyAccountError::RepositoryError(UNCONFIGURED.to_string()))
    }
}

#[async_trait]
impl ForgotPasswordUseCase for Unconfigured {
    async fn execute(&self, _: &str) -> Result<(), ForgotPasswordError> {
        Err(ForgotPasswordError::RepositoryError(UNCONFIGURED.to_string()))
    }
}

#[async_trait]
impl ResetPasswordUseCase for Unconfigured {
    async fn execute(&self, _: ResetPasswordRequest) -> Result<(), ResetPasswordError> {
        Err(ResetPasswordError::RepositoryError(UNCONFIGURED.to_string()))
    }
}

#[async_trait]
impl RefreshTokenUseCase for Unconfigured {
    async fn execute(&self, _: &str) -> Result<TokenPair, RefreshTokenError> {
        Err(RefreshTokenError::InvalidToken)
    }
}

#[async_trait]
impl FetchUserProfileUseCase for Unconfigured {
    async fn execute(&self, email: &str) -> Result<FetchUserOutput, FetchUserError> {
        Err(FetchUserError::UserNotFound(email.to_string()))
    }
}

#[async_trait]
impl CreatePlanUseCase for Unconfigured {
    async fn execute(&self, _: i32, _: CreatePlanCommand) -> Result<Plan, CreatePlanError> {
        Err(CreatePlanError::RepositoryError(UNCONFIGURED.to_string()))
    }
}

#[async_trait]
impl UpdatePlanUseCase for Unconfigured {
    async fn execute(&self, _: i32, _: i32, _: PlanUpdate) -> Result<Plan, UpdatePlanError> {
        Err(UpdatePlanError::RepositoryError(UNCONFIGURED.to_string()))
    }
}

#[async_trait]
impl ListPlansUseCase for Unconfigured {
    async fn execute(&self, _: i32, _: PlanFilter) -> Result<Vec<PlanView>, ListPlansError> {
        Err(ListPlansError::RepositoryError(UNCONFIGURED.to_string()))
    }
}

#[async_trait]
impl CreateSubscriptionUseCase for Unconfigured {
    async fn execute(
        &self,
        _: i32,
        _: CreateSubscriptionCommand,
    ) -> Result<Subscription, CreateSubscriptionError> {
        Err(CreateSubscriptionError::RepositoryError(UNCONFIGURED.to_string()))
    }
}

#[async_trait]
impl ListSubscriptionsUseCase for Unconfigured {
    async fn execute(
        &self,
        _: ListSubscriptionsRequest,
    ) -> Result<Vec<Subscription>, ListSubscriptionsError> {
        Err(ListSubscriptionsError::RepositoryError(UNCONFIGURED.to_string()))
    }
}

#[async_trait]
impl ReceiveWebhookUseCase for Unconfigured {
    async fn execute(&self, _: Option<&str>, _: &[u8]) -> Result<ContractEvent, ReceiveWebhookError> {
        Err(ReceiveWebhookError::InvalidSignature)
    }
}
