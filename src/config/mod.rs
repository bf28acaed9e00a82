use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Development-only signing key, used when SECRET_KEY is unset outside production/test
const DEVELOPMENT_SECRET: &str = "secret-dev";

/// Longest accepted token lifetime (one year)
const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 366;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Read APP_ENV; anything unrecognised means development
    pub fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => Environment::Development,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    /// Empty means any origin is allowed
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match Environment::from_env() {
            Environment::Production => Self::production(),
            Environment::Test => Self::test(),
            Environment::Development => Self::development(),
        };

        base.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // The test profile prefers its own database so a dev database is never clobbered
        let database_url = match self.environment {
            Environment::Test => env::var("TEST_DATABASE_URL").or_else(|_| env::var("DATABASE_URL")),
            _ => env::var("DATABASE_URL"),
        };
        self.database.url = database_url.map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_var("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }

        if let Ok(v) = env::var("HOST") {
            self.api.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.api.port = parse_var("PORT", &v)?;
        }

        match env::var("SECRET_KEY") {
            Ok(v) if !v.is_empty() => self.security.jwt_secret = v,
            _ if self.environment == Environment::Production => {
                return Err(ConfigError::Missing("SECRET_KEY"));
            }
            _ => {}
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = parse_expiry_hours(&v)?;
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.security.cors_origins = parse_origins(&v);
        }

        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_SECRET.to_string(),
                jwt_expiry_hours: 24 * 7,
                cors_origins: Vec::new(),
            },
        }
    }

    /// Profile used by the test suite; callers fill in `database.url` themselves.
    pub fn test() -> Self {
        Self {
            environment: Environment::Test,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 2,
                connection_timeout: 5,
            },
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            security: SecurityConfig {
                jwt_secret: "secret-test".to_string(),
                jwt_expiry_hours: 1,
                cors_origins: Vec::new(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 5,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 12,
                cors_origins: Vec::new(),
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

fn parse_expiry_hours(value: &str) -> Result<u64, ConfigError> {
    let hours: u64 = parse_var("JWT_EXPIRY_HOURS", value)?;
    if hours == 0 || hours > MAX_JWT_EXPIRY_HOURS {
        return Err(ConfigError::Invalid {
            name: "JWT_EXPIRY_HOURS",
            value: value.to_string(),
        });
    }
    Ok(hours)
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "*")
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.port, 3001);
        assert_eq!(config.security.jwt_secret, DEVELOPMENT_SECRET);
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_production_has_no_default_secret() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_bind_addr() {
        let mut config = AppConfig::test();
        config.api.port = 4000;
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn parses_cors_origins() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test ,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("*").is_empty());
    }

    #[test]
    fn bounds_token_expiry() {
        assert_eq!(parse_expiry_hours("12").unwrap(), 12);
        assert_eq!(parse_expiry_hours("8784").unwrap(), MAX_JWT_EXPIRY_HOURS);
        for value in ["0", "8785", "9223372036854775808", "18446744073709551615"] {
            let err = parse_expiry_hours(value).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { name: "JWT_EXPIRY_HOURS", .. }), "{value}");
        }
    }

    #[test]
    fn rejects_invalid_numbers() {
        let err = parse_var::<u16>("PORT", "not-a-port").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }
}
