/// gRPC Configuration
///
/// Endpoint and transport settings for calls to identity-service.
use std::env;
use std::time::Duration;

use tonic::transport::{Channel, Endpoint};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid gRPC endpoint {url}: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: tonic::transport::Error,
    },
}

#[derive(Clone)]
pub struct GrpcConfig {
    /// Identity Service endpoint
    pub identity_service_url: String,

    /// gRPC connection timeout in seconds
    pub connection_timeout_secs: u64,

    /// Per-request deadline in milliseconds
    pub request_timeout_ms: u64,

    /// HTTP/2 keep-alive interval in seconds
    pub keepalive_interval_secs: u64,

    /// HTTP/2 keep-alive timeout in seconds
    pub keepalive_timeout_secs: u64,

    /// Shared key attached as `x-internal-api-key` when set
    pub internal_api_key: Option<String>,
}

impl std::fmt::Debug for GrpcConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrpcConfig")
            .field("identity_service_url", &self.identity_service_url)
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("keepalive_interval_secs", &self.keepalive_interval_secs)
            .field("keepalive_timeout_secs", &self.keepalive_timeout_secs)
            .field(
                "internal_api_key",
                &self.internal_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl GrpcConfig {
    /// Load configuration from environment variables
    /// Falls back to defaults for development
    pub fn from_env() -> Self {
        Self {
            identity_service_url: env::var("GRPC_IDENTITY_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:9081".to_string()),
            connection_timeout_secs: env_or("GRPC_CONNECTION_TIMEOUT_SECS", 5),
            request_timeout_ms: env_or("GRPC_REQUEST_TIMEOUT_MS", 2000),
            keepalive_interval_secs: env_or("GRPC_KEEPALIVE_INTERVAL_SECS", 30),
            keepalive_timeout_secs: env_or("GRPC_KEEPALIVE_TIMEOUT_SECS", 10),
            internal_api_key: env::var("INTERNAL_GRPC_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
        }
    }

    /// Configuration for development/testing
    pub fn development() -> Self {
        Self {
            identity_service_url: "http://localhost:9081".to_string(),
            connection_timeout_secs: 5,
            request_timeout_ms: 2000,
            keepalive_interval_secs: 30,
            keepalive_timeout_secs: 10,
            internal_api_key: None,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Build a tonic Endpoint from URL with timeouts/keepalive
    pub fn make_endpoint(&self, url: &str) -> Result<Endpoint, ConfigError> {
        let endpoint = Endpoint::from_shared(url.to_string())
            .map_err(|source| ConfigError::InvalidEndpoint {
                url: url.to_string(),
                source,
            })?
            .connect_timeout(Duration::from_secs(self.connection_timeout_secs))
            .timeout(self.request_timeout())
            .http2_keep_alive_interval(Duration::from_secs(self.keepalive_interval_secs))
            .keep_alive_timeout(Duration::from_secs(self.keepalive_timeout_secs))
            .tcp_nodelay(true);

        Ok(endpoint)
    }

    /// Channel that connects on first use
    pub fn connect_lazy(&self, url: &str) -> Result<Channel, ConfigError> {
        Ok(self.make_endpoint(url)?.connect_lazy())
    }
}
