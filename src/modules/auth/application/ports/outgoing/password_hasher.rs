use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed: {0}")]
    HashFailed(String),

    /// The stored hash could not be parsed; distinct from a wrong password.
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Hashing task did not complete: {0}")]
    TaskFailed(String),
}

/// Passwords are only ever stored as the string this returns.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;

    /// `Ok(false)` for a wrong password, `Err` only when checking was impossible.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
