use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};

use crate::auth::application::helpers::{ResolveUserIdError, ResolvedUser};
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::{shared::api::ApiResponse, AppState};

/// Bearer of a valid access token. `email` is the token subject.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let jwt_service = match req.app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>() {
            Some(service) => service,
            None => {
                tracing::error!("Token provider is not registered as app data");
                return ready(Err(create_api_error(ApiResponse::internal_error())));
            }
        };

        let token = match extract_token_from_header(req) {
            Some(t) => t,
            None => {
                return ready(Err(create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))));
            }
        };

        match jwt_service.verify_token(&token) {
            Ok(claims) => {
                if !claims.is_access() {
                    return ready(Err(create_api_error(ApiResponse::unauthorized(
                        "INVALID_TOKEN_TYPE",
                        "Invalid token type",
                    ))));
                }

                ready(Ok(AuthenticatedUser { email: claims.sub }))
            }
            Err(_) => ready(Err(create_api_error(ApiResponse::unauthorized(
                "INVALID_TOKEN",
                "Invalid or expired token",
            )))),
        }
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Looks the bearer up so handlers can read their id and admin flag.
pub async fn resolve_caller_or_response(
    data: &web::Data<AppState>,
    user: &AuthenticatedUser,
) -> Result<ResolvedUser, HttpResponse> {
    match data.user_identity_resolver.by_email(&user.email).await {
        Ok(resolved) => Ok(resolved),

        Err(ResolveUserIdError::NotFound) => {
            Err(ApiResponse::not_found("USER_NOT_FOUND", "User not found"))
        }

        Err(ResolveUserIdError::RepositoryError(msg)) => {
            tracing::error!(email = %user.email, error = %msg, "Failed to resolve caller");
            Err(ApiResponse::internal_error())
        }
    }
}

/// Like [`resolve_caller_or_response`] but only lets superusers through.
pub async fn require_superuser_or_response(
    data: &web::Data<AppState>,
    user: &AuthenticatedUser,
) -> Result<ResolvedUser, HttpResponse> {
    let caller = resolve_caller_or_response(data, user).await?;
    if !caller.is_superuser {
        tracing::warn!(user_id = %caller.id, "Administrator route called by a regular user");
        return Err(ApiResponse::forbidden(
            "FORBIDDEN",
            "Administrator access required",
        ));
    }
    Ok(caller)
}
