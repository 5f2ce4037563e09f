/// gRPC Clients Library
///
/// Generates the identity-service client stubs and builds the channels other
/// services use to reach it.
pub mod config;

pub use config::{ConfigError, GrpcConfig};

pub mod identity {
    pub mod v1 {
        tonic::include_proto!("identity.v1");
    }
    pub use v1::*;
}

pub use identity::identity_service_client::IdentityServiceClient;

use tonic::transport::Channel;

/// Build an `IdentityServiceClient` on a lazily connected channel
///
/// Never blocks on the network: an unreachable identity-service surfaces as
/// `Unavailable` on the first call instead of failing startup.
pub fn identity_client(config: &GrpcConfig) -> Result<IdentityServiceClient<Channel>, ConfigError> {
    let channel = config.connect_lazy(&config.identity_service_url)?;
    tracing::debug!(url = %config.identity_service_url, "identity-service channel configured");
    Ok(IdentityServiceClient::new(channel))
}
