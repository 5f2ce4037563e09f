/// Configuration management for Item Service
///
/// Everything comes from environment variables (plus `.env` in debug
/// builds). Only `DATABASE_URL` is required.
use anyhow::{Context, Result};
use db_pool::DbConfig;
use grpc_clients::config::GrpcConfig;
use std::env;

pub const SERVICE_NAME: &str = "item-service";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DbConfig,
    /// identity-service channel
    pub grpc: GrpcConfig,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Grace period for in-flight requests after a shutdown signal
    pub shutdown_grace_secs: u64,
}

impl AppConfig {
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        let app = AppConfig {
            host: env::var("ITEM_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("ITEM_SERVICE_PORT")
                .unwrap_or_else(|_| "8082".to_string())
                .parse()
                .context("Invalid ITEM_SERVICE_PORT")?,
            shutdown_grace_secs: env::var("SHUTDOWN_GRACE_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid SHUTDOWN_GRACE_SECS")?,
        };

        Ok(Config {
            app,
            database: DbConfig::from_env(SERVICE_NAME)?,
            grpc: GrpcConfig::from_env(),
            run_migrations: matches!(
                env::var("RUN_MIGRATIONS").ok().as_deref().map(str::trim),
                Some("1") | Some("true") | Some("TRUE") | Some("yes")
            ),
        })
    }
}
