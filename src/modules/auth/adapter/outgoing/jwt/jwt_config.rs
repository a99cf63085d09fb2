use crate::config::{parse_or, required, ConfigError};

pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub access_token_expiry: i64,  // seconds
    pub refresh_token_expiry: i64, // seconds
}

impl JwtConfig {
    /// Reads `JWT_SECRET`, `JWT_ACCESS_EXPIRY` and `JWT_REFRESH_EXPIRY`.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = required(lookup, "JWT_SECRET")?;

        // HS256 wants at least 32 bytes of key material
        if secret_key.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!("must be at least {} characters long", MIN_SECRET_LENGTH),
            });
        }

        let access_token_expiry = parse_or(lookup, "JWT_ACCESS_EXPIRY", 18000i64)?;
        let refresh_token_expiry = parse_or(lookup, "JWT_REFRESH_EXPIRY", 604800i64)?;

        if access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                reason: "must be positive".to_string(),
            });
        }

        if refresh_token_expiry <= access_token_expiry {
            return Err(ConfigError::Invalid {
                key: "JWT_REFRESH_EXPIRY",
                reason: "must be greater than JWT_ACCESS_EXPIRY".to_string(),
            });
        }

        Ok(Self {
            secret_key,
            access_token_expiry,
            refresh_token_expiry,
        })
    }
}
