//! Configuration management for Identity Service
//!
//! Loads settings from environment variables, with a `.env` file honored in
//! debug builds.
//!
//! # Example
//!
//! ```no_run
//! use identity_service::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     println!("gRPC port: {}", settings.server.grpc_port);
//!     Ok(())
//! }
//! ```

use anyhow::{bail, Context, Result};
use db_pool::DbConfig;
use std::env;
use std::fmt;
use std::time::Duration;

const SERVICE_NAME: &str = "identity-service";

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub server: ServerSettings,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
    /// When set, gRPC callers must present it as `x-internal-api-key`
    pub internal_grpc_api_key: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Load .env file in development
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        Ok(Settings {
            database: DatabaseSettings::from_env()?,
            jwt: JwtSettings::from_env()?,
            server: ServerSettings::from_env()?,
            run_migrations: parse_bool(env::var("RUN_MIGRATIONS").ok()),
            internal_grpc_api_key: env::var("INTERNAL_GRPC_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
        })
    }
}

fn parse_bool(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("yes")
    )
}

/// Database connection settings
#[derive(Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid DB_MAX_CONNECTIONS")?,
        })
    }

    pub fn pool_config(&self) -> DbConfig {
        DbConfig {
            service_name: SERVICE_NAME.to_string(),
            database_url: self.url.clone(),
            max_connections: self.max_connections,
            ..DbConfig::default()
        }
    }
}

/// Token signing settings
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub expiry_seconds: u64,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"[REDACTED]")
            .field("expiry_seconds", &self.expiry_seconds)
            .finish()
    }
}

impl JwtSettings {
    fn from_env() -> Result<Self> {
        let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        Ok(Self {
            secret,
            expiry_seconds: env::var("JWT_EXPIRY_SECONDS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .context("Invalid JWT_EXPIRY_SECONDS")?,
        })
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.expiry_seconds)
    }
}

/// Listener settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub grpc_port: u16,
    pub http_port: u16,
    /// Time in-flight requests get after a shutdown signal
    pub shutdown_grace_secs: u64,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("IDENTITY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            grpc_port: env::var("IDENTITY_GRPC_PORT")
                .unwrap_or_else(|_| "9081".to_string())
                .parse()
                .context("Invalid IDENTITY_GRPC_PORT")?,
            http_port: env::var("IDENTITY_HTTP_PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()
                .context("Invalid IDENTITY_HTTP_PORT")?,
            shutdown_grace_secs: env::var("SHUTDOWN_GRACE_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid SHUTDOWN_GRACE_SECS")?,
        })
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: &[&str] = &[
        "DATABASE_URL",
        "DB_MAX_CONNECTIONS",
        "JWT_SECRET",
        "JWT_EXPIRY_SECONDS",
        "IDENTITY_HOST",
        "IDENTITY_GRPC_PORT",
        "IDENTITY_HTTP_PORT",
        "SHUTDOWN_GRACE_SECS",
        "RUN_MIGRATIONS",
        "INTERNAL_GRPC_API_KEY",
    ];

    fn reset_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        reset_env();
        env::set_var("DATABASE_URL", "postgres://localhost/identity");
        env::set_var("JWT_SECRET", "dev-secret");

        let settings = Settings::load().expect("settings should load");
        assert_eq!(settings.server.grpc_port, 9081);
        assert_eq!(settings.server.http_port, 8081);
        assert_eq!(settings.server.shutdown_grace(), Duration::from_secs(10));
        assert_eq!(settings.jwt.expiry_seconds, 3600);
        assert!(!settings.run_migrations);
        assert!(settings.internal_grpc_api_key.is_none());

        reset_env();
    }

    #[test]
    #[serial]
    fn test_missing_secret_is_rejected() {
        reset_env();
        env::set_var("DATABASE_URL", "postgres://localhost/identity");
        assert!(Settings::load().is_err());

        env::set_var("JWT_SECRET", "   ");
        assert!(Settings::load().is_err());

        reset_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_rejected() {
        reset_env();
        env::set_var("DATABASE_URL", "postgres://localhost/identity");
        env::set_var("JWT_SECRET", "dev-secret");
        env::set_var("IDENTITY_GRPC_PORT", "not-a-port");

        let err = Settings::load().unwrap_err();
        assert!(err.to_string().contains("IDENTITY_GRPC_PORT"));

        reset_env();
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let jwt = JwtSettings {
            secret: "super-secret".to_string(),
            expiry_seconds: 60,
        };
        let db = DatabaseSettings {
            url: "postgres://user:pw@db/identity".to_string(),
            max_connections: 5,
        };
        assert!(!format!("{jwt:?}").contains("super-secret"));
        assert!(!format!("{db:?}").contains("pw@db"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool(Some("true".into())));
        assert!(parse_bool(Some("1".into())));
        assert!(!parse_bool(Some("false".into())));
        assert!(!parse_bool(None));
    }
}
