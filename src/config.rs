//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

use crate::domain::SelfTransferPolicy;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Whether a transfer may name the same account on both sides
    pub self_transfer_policy: SelfTransferPolicy,

    /// Apply embedded migrations at start-up
    pub run_migrations: bool,

    /// Insert demo users and accounts at start-up
    pub seed_database: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").ok_or(ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let self_transfer_policy = lookup("SELF_TRANSFER_POLICY")
            .map(|v| v.parse::<SelfTransferPolicy>())
            .transpose()
            .map_err(|_| ConfigError::InvalidValue("SELF_TRANSFER_POLICY"))?
            .unwrap_or_default();

        let run_migrations = parse_bool(lookup("RUN_MIGRATIONS"), true)
            .ok_or(ConfigError::InvalidValue("RUN_MIGRATIONS"))?;

        let seed_database = parse_bool(lookup("SEED_DATABASE"), false)
            .ok_or(ConfigError::InvalidValue("SEED_DATABASE"))?;

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            self_transfer_policy,
            run_migrations,
            seed_database,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_bool(value: Option<String>, default: bool) -> Option<bool> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Some(default),
        Some("1" | "true" | "yes") => Some(true),
        Some("0" | "false" | "no") => Some(false),
        Some(_) => None,
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/bank")]).unwrap();
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.port, 8080);
        assert_eq!(config.self_transfer_policy, SelfTransferPolicy::Reject);
        assert!(config.run_migrations);
        assert!(!config.seed_database);
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv("DATABASE_URL")));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/bank"),
            ("PORT", "9090"),
            ("ENVIRONMENT", "production"),
            ("SELF_TRANSFER_POLICY", "allow"),
            ("RUN_MIGRATIONS", "false"),
            ("SEED_DATABASE", "yes"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert!(config.is_production());
        assert_eq!(config.self_transfer_policy, SelfTransferPolicy::Allow);
        assert!(!config.run_migrations);
        assert!(config.seed_database);
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("DATABASE_URL", "x"), ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("PORT")));

        let err = load(&[("DATABASE_URL", "x"), ("SELF_TRANSFER_POLICY", "sometimes")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("SELF_TRANSFER_POLICY")));

        let err = load(&[("DATABASE_URL", "x"), ("SEED_DATABASE", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("SEED_DATABASE")));
    }
}
