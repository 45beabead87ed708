/// Configuration management for Articles Service
///
/// Loads configuration from environment variables.
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

const DEV_JWT_SECRET: &str = "articles-service-dev-secret";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration; `None` runs the service on the in-memory store
    pub database: Option<DatabaseConfig>,
    /// Token verification settings
    pub auth: AuthConfig,
    /// Redirect targets
    pub routes: RoutesConfig,
    /// Log output settings
    pub log: LogConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Min connections in pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the identity provider
    #[serde(skip_serializing)]
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Prefix of user profile pages, e.g. `/accounts/` gives `/accounts/alice/`
    pub profile_path_prefix: String,
}

impl RoutesConfig {
    pub fn profile_url(&self, username: &str) -> String {
        let prefix = self.profile_path_prefix.trim_end_matches('/');
        format!("{}/{}/", prefix, username)
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            profile_path_prefix: "/accounts/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
}

// Default values
fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
        };

        let database = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Some(DatabaseConfig {
                url,
                max_connections: std::env::var("DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: std::env::var("DB_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            }),
            _ if app.is_production() => bail!("DATABASE_URL must be set in production"),
            _ => None,
        };

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if app.is_production() => bail!("JWT_SECRET must be set in production"),
            _ => DEV_JWT_SECRET.to_string(),
        };

        let routes = RoutesConfig {
            profile_path_prefix: std::env::var("PROFILE_PATH_PREFIX")
                .unwrap_or_else(|_| RoutesConfig::default().profile_path_prefix),
        };

        let format = match std::env::var("LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Ok(value) if value.eq_ignore_ascii_case("text") || value.is_empty() => LogFormat::Text,
            Ok(value) => bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", value),
            Err(_) => LogFormat::Text,
        };

        Ok(Config {
            app,
            database,
            auth: AuthConfig { jwt_secret },
            routes,
            log: LogConfig { format },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "PORT",
            "DATABASE_URL",
            "DB_MAX_CONNECTIONS",
            "DB_MIN_CONNECTIONS",
            "JWT_SECRET",
            "PROFILE_PATH_PREFIX",
            "LOG_FORMAT",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_default_values() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.auth.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(config.routes.profile_path_prefix, "/accounts/");
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    #[serial]
    fn test_database_settings() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://test");
        std::env::set_var("DB_MAX_CONNECTIONS", "7");

        let config = Config::from_env().unwrap();
        let database = config.database.unwrap();

        assert_eq!(database.url, "postgres://test");
        assert_eq!(database.max_connections, 7);
        assert_eq!(database.min_connections, 2);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_production_requires_database_and_secret() {
        clear_env();
        std::env::set_var("APP_ENV", "production");
        assert!(Config::from_env().is_err());

        std::env::set_var("DATABASE_URL", "postgres://prod");
        assert!(Config::from_env().is_err());

        std::env::set_var("JWT_SECRET", "s3cret");
        assert!(Config::from_env().is_ok());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_rejects_unknown_log_format() {
        clear_env();
        std::env::set_var("LOG_FORMAT", "yaml");
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_profile_url() {
        let routes = RoutesConfig {
            profile_path_prefix: "/accounts".to_string(),
        };
        assert_eq!(routes.profile_url("alice"), "/accounts/alice/");
        assert_eq!(RoutesConfig::default().profile_url("bob"), "/accounts/bob/");
    }
}
