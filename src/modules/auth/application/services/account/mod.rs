pub mod fetch_profile;
pub mod forgot_password;
pub mod login_user;
pub mod refresh_token;
pub mod register_user;
pub mod reset_password;
pub mod verify_account;

pub use fetch_profile::FetchUserProfileService;
pub use forgot_password::ForgotPasswordService;
pub use login_user::LoginUserService;
pub use refresh_token::RefreshTokenService;
pub use register_user::RegisterUserService;
pub use reset_password::ResetPasswordService;
pub use verify_account::VerifyAccountService;

use crate::auth::application::ports::outgoing::{TokenError, TokenProvider};
use crate::auth::application::use_cases::TokenPair;

pub(crate) fn issue_token_pair(
    token_provider: &dyn TokenProvider,
    subject: &str,
) -> Result<TokenPair, TokenError> {
    Ok(TokenPair {
        access_token: token_provider.generate_access_token(subject)?,
        refresh_token: token_provider.generate_refresh_token(subject)?,
    })
}
