pub mod auth;

pub use auth::{require_superuser_or_response, resolve_caller_or_response, AuthenticatedUser};
