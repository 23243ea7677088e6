//! Configuration management for AuthGate
//!
//! This module handles loading and validating configuration from environment variables,
//! with support for different environments (development, staging, production).
//! Everything is validated once, before the server starts accepting connections.

use std::env;
use std::net::IpAddr;
use thiserror::Error;

/// Minimum signing secret length accepted in production
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Invalid secret: {0}")]
    InvalidSecret(String),
}

/// Application environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Get the environment name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Current environment
    pub environment: Environment,

    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Maximum database connections
    pub db_max_connections: u32,

    /// CORS allowed origins
    pub cors_allowed_origins: Option<String>,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// Secret used to sign access tokens
    pub access_token_secret: String,

    /// Secret used to sign refresh tokens
    pub refresh_token_secret: String,

    /// Access token TTL in seconds (default: 15)
    pub access_token_ttl_seconds: i64,

    /// Refresh token TTL in seconds (default: 86400 = 1 day)
    pub refresh_token_ttl_seconds: i64,

    /// bcrypt work factor (default: 10)
    pub bcrypt_cost: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str, alias: &str| {
            var(key)
                .or_else(|| var(alias))
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let environment = var("ENVIRONMENT")
            .map(|s| Environment::parse(&s))
            .unwrap_or(Ok(Environment::Development))?;

        let database_url = required("DATABASE_URL", "DB_CONNECT")?;
        if !(database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")) {
            return Err(ConfigError::InvalidDatabaseUrl(
                "DATABASE_URL must use the postgres:// or postgresql:// scheme".to_string(),
            ));
        }

        let access_token_secret = required("ACCESS_TOKEN_SECRET", "ACCESS_KEY")?;
        let refresh_token_secret = required("REFRESH_TOKEN_SECRET", "REFRESH_KEY")?;
        validate_secrets(&environment, &access_token_secret, &refresh_token_secret)?;

        let host = var("HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidValue("HOST must be an IP address".to_string()))?;

        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let db_max_connections: u32 = positive(var("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?;
        let access_token_ttl_seconds: i64 =
            positive(var("ACCESS_TOKEN_TTL_SECONDS"), "ACCESS_TOKEN_TTL_SECONDS", 15)?;
        let refresh_token_ttl_seconds: i64 = positive(
            var("REFRESH_TOKEN_TTL_SECONDS"),
            "REFRESH_TOKEN_TTL_SECONDS",
            24 * 60 * 60,
        )?;

        let bcrypt_cost: u32 = positive(var("BCRYPT_COST"), "BCRYPT_COST", 10)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue(
                "BCRYPT_COST must be between 4 and 31".to_string(),
            ));
        }

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS");

        let log_level = var("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Config {
            database_url,
            environment,
            host,
            port,
            db_max_connections,
            cors_allowed_origins,
            log_level,
            access_token_secret,
            refresh_token_secret,
            access_token_ttl_seconds,
            refresh_token_ttl_seconds,
            bcrypt_cost,
        })
    }

    /// Get database URL (useful for logging masked version)
    pub fn database_url_masked(&self) -> String {
        // Mask password in database URL for logging
        if let Some(at_pos) = self.database_url.find('@') {
            if let Some(colon_pos) = self.database_url[..at_pos].rfind(':') {
                let prefix = &self.database_url[..colon_pos + 1];
                let suffix = &self.database_url[at_pos..];
                return format!("{}****{}", prefix, suffix);
            }
        }
        self.database_url.clone()
    }
}

fn validate_secrets(
    environment: &Environment,
    access_secret: &str,
    refresh_secret: &str,
) -> Result<(), ConfigError> {
    if access_secret == refresh_secret {
        return Err(ConfigError::InvalidSecret(
            "ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must differ".to_string(),
        ));
    }

    if environment.is_production() {
        for (name, secret) in [
            ("ACCESS_TOKEN_SECRET", access_secret),
            ("REFRESH_TOKEN_SECRET", refresh_secret),
        ] {
            if secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ConfigError::InvalidSecret(format!(
                    "{} must be at least {} bytes in production",
                    name, MIN_PRODUCTION_SECRET_LEN
                )));
            }
        }
    }

    Ok(())
}

fn positive<T>(raw: Option<String>, name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(ConfigError::InvalidValue(format!(
            "{} must be a positive number, got '{}'",
            name, raw
        ))),
    }
}
