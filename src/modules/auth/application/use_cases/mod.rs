pub mod fetch_profile;
pub mod forgot_password;
pub mod login_user;
pub mod refresh_token;
pub mod register_user;
pub mod reset_password;
pub mod verify_account;

use email_address::EmailAddress;
use serde::Serialize;

/// Access + refresh token pair handed out on register, login and refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CredentialInputError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

/// Trims and lowercases; rejects syntactically invalid addresses.
pub fn normalize_email(email: &str) -> Result<String, CredentialInputError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(CredentialInputError::EmptyEmail);
    }

    if !EmailAddress::is_valid(email) {
        return Err(CredentialInputError::InvalidEmailFormat);
    }

    Ok(email.to_lowercase())
}

pub fn require_password(password: &str) -> Result<String, CredentialInputError> {
    if password.trim().is_empty() {
        return Err(CredentialInputError::EmptyPassword);
    }
    Ok(password.to_string())
}
