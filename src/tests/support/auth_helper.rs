use std::sync::Arc;

use actix_web::web;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::ports::outgoing::TokenProvider;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only_0123456789";

pub fn create_test_jwt_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret_key: TEST_JWT_SECRET.to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 86400,
    })
}

/// Token provider in the shape the bearer extractor reads from app data.
pub fn test_token_provider() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(create_test_jwt_service());
    web::Data::new(provider)
}

pub fn bearer(email: &str) -> String {
    let token = create_test_jwt_service()
        .generate_access_token(email)
        .expect("test token");
    format!("Bearer {}", token)
}
