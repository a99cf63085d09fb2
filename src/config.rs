use std::env;
use std::str::FromStr;

use crate::auth::adapter::outgoing::jwt::JwtConfig;

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub enum EmailTransport {
    Smtp {
        server: String,
        username: String,
        password: String,
    },
    /// Writes notices to the log instead of delivering them.
    Log,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub from_email: String,
    pub transport: EmailTransport,
}

#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    pub api_version: String,
    pub webhook_secret: String,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub email: EmailConfig,
    pub frontend_url: String,
    pub shopify: ShopifyConfig,
    pub verification_code_ttl_minutes: i64,
}

impl AppConfig {
    /// Loads `.env.{RUST_ENV}` (falling back to `.env`) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        let env_file = format!(".env.{}", environment);
        if dotenvy::from_filename(&env_file).is_err() {
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let host = optional(&lookup, "HOST", "127.0.0.1");
        let port = parse_or(&lookup, "PORT", 8000u16)?;

        let jwt = JwtConfig::from_lookup(&lookup)?;

        let from_email = required(&lookup, "EMAIL_FROM")?;
        let transport = match optional(&lookup, "EMAIL_TRANSPORT", "smtp").as_str() {
            "smtp" => EmailTransport::Smtp {
                server: required(&lookup, "SMTP_SERVER")?,
                username: required(&lookup, "SMTP_USERNAME")?,
                password: required(&lookup, "SMTP_PASSWORD")?,
            },
            "log" => EmailTransport::Log,
            other => {
                return Err(ConfigError::Invalid {
                    key: "EMAIL_TRANSPORT",
                    reason: format!("expected 'smtp' or 'log', got '{}'", other),
                })
            }
        };

        let webhook_secret = required(&lookup, "SHOPIFY_WEBHOOK_SECRET")?;
        if webhook_secret.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "SHOPIFY_WEBHOOK_SECRET",
                reason: "must not be empty".to_string(),
            });
        }

        let max_attempts = parse_or(&lookup, "CATALOG_MAX_ATTEMPTS", 3u32)?;
        if max_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "CATALOG_MAX_ATTEMPTS",
                reason: "must be at least 1".to_string(),
            });
        }

        let verification_code_ttl_minutes = parse_or(&lookup, "VERIFICATION_CODE_TTL_MINUTES", 30i64)?;
        if verification_code_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "VERIFICATION_CODE_TTL_MINUTES",
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            database_url,
            host,
            port,
            jwt,
            email: EmailConfig {
                from_email,
                transport,
            },
            frontend_url: optional(&lookup, "FRONTEND_URL", "http://localhost:3000"),
            shopify: ShopifyConfig {
                api_version: optional(&lookup, "SHOPIFY_API_VERSION", "2024-01"),
                webhook_secret,
                max_attempts,
                base_delay_ms: parse_or(&lookup, "CATALOG_RETRY_BASE_MS", 200u64)?,
            },
            verification_code_ttl_minutes,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub(crate) fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or(ConfigError::Missing(key))
}

pub(crate) fn optional<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

pub(crate) fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        let mut vars = HashMap::new();
        vars.insert("DATABASE_URL", "postgres://localhost/subscriptions");
        vars.insert("JWT_SECRET", "0123456789abcdef0123456789abcdef");
        vars.insert("EMAIL_FROM", "noreply@example.com");
        vars.insert("EMAIL_TRANSPORT", "log");
        vars.insert("SHOPIFY_WEBHOOK_SECRET", "whsec_test");
        vars
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_are_applied() {
        let config = load(&base_vars()).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.shopify.api_version, "2024-01");
        assert_eq!(config.shopify.max_attempts, 3);
        assert_eq!(config.verification_code_ttl_minutes, 30);
        assert_eq!(config.jwt.access_token_expiry, 18000);
        assert_eq!(config.jwt.refresh_token_expiry, 604800);
        assert!(matches!(config.email.transport, EmailTransport::Log));
    }

    #[test]
    fn test_missing_database_url() {
        let mut vars = base_vars();
        vars.remove("DATABASE_URL");

        assert_eq!(
            load(&vars).unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );
    }

    #[test]
    fn test_smtp_transport_requires_credentials() {
        let mut vars = base_vars();
        vars.insert("EMAIL_TRANSPORT", "smtp");

        assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing("SMTP_SERVER"));
    }

    #[test]
    fn test_unknown_transport_is_rejected() {
        let mut vars = base_vars();
        vars.insert("EMAIL_TRANSPORT", "carrier-pigeon");

        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid { key: "EMAIL_TRANSPORT", .. }
        ));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = base_vars();
        vars.insert("PORT", "eighty");

        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid { key: "PORT", .. }
        ));
    }

    #[test]
    fn test_zero_catalog_attempts_rejected() {
        let mut vars = base_vars();
        vars.insert("CATALOG_MAX_ATTEMPTS", "0");

        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid { key: "CATALOG_MAX_ATTEMPTS", .. }
        ));
    }
}
