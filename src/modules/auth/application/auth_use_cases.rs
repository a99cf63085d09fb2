use std::sync::Arc;

use crate::auth::application::use_cases::{
    fetch_profile::FetchUserProfileUseCase, forgot_password::ForgotPasswordUseCase,
    login_user::LoginUserUseCase, refresh_token::RefreshTokenUseCase,
    register_user::RegisterUserUseCase, reset_password::ResetPasswordUseCase,
    verify_account::VerifyAccountUseCase,
};

#[derive(Clone)]
pub struct AuthUseCases {
    pub register: Arc<dyn RegisterUserUseCase + Send + Sync>,
    pub login: Arc<dyn LoginUserUseCase + Send + Sync>,
    pub verify_account: Arc<dyn VerifyAccountUseCase + Send + Sync>,
    pub forgot_password: Arc<dyn ForgotPasswordUseCase + Send + Sync>,
    pub reset_password: Arc<dyn ResetPasswordUseCase + Send + Sync>,
    pub refresh_token: Arc<dyn RefreshTokenUseCase + Send + Sync>,
    pub fetch_profile: Arc<dyn FetchUserProfileUseCase + Send + Sync>,
}
