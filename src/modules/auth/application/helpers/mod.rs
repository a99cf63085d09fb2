pub mod user_identity_resolver;

pub use user_identity_resolver::{ResolveUserIdError, ResolvedUser, UserIdentityResolver};
