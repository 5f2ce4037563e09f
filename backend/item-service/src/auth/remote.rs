/// `TokenValidator` backed by identity-service's `ValidateToken` RPC
use super::{Claims, TokenValidator, ValidationFailure};
use crate::correlation;
use async_trait::async_trait;
use crypto_core::correlation::{inject_into_metadata, new_correlation_id};
use grpc_clients::identity::ValidateTokenRequest;
use grpc_clients::{ConfigError, GrpcConfig, IdentityServiceClient};
use resilience::{with_timeout_result, CallError};
use std::time::Duration;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::Channel;

const INTERNAL_API_KEY_HEADER: &str = "x-internal-api-key";

#[derive(Clone)]
pub struct GrpcTokenValidator {
    client: IdentityServiceClient<Channel>,
    timeout: Duration,
    internal_api_key: Option<MetadataValue<Ascii>>,
}

impl GrpcTokenValidator {
    pub fn new(
        client: IdentityServiceClient<Channel>,
        timeout: Duration,
        internal_api_key: Option<&str>,
    ) -> Self {
        let internal_api_key = internal_api_key.and_then(|key| match MetadataValue::try_from(key) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("INTERNAL_GRPC_API_KEY is not valid ASCII metadata; not sending it");
                None
            }
        });

        Self {
            client,
            timeout,
            internal_api_key,
        }
    }

    /// Lazily connected validator; never dials during construction
    pub fn from_config(config: &GrpcConfig) -> Result<Self, ConfigError> {
        let client = grpc_clients::identity_client(config)?;
        Ok(Self::new(
            client,
            config.request_timeout(),
            config.internal_api_key.as_deref(),
        ))
    }
}

#[async_trait]
impl TokenValidator for GrpcTokenValidator {
    async fn validate(&self, token: &str) -> Result<Claims, ValidationFailure> {
        let mut request = tonic::Request::new(ValidateTokenRequest {
            token: token.to_string(),
        });

        let correlation_id = correlation::current().unwrap_or_else(new_correlation_id);
        inject_into_metadata(request.metadata_mut(), &correlation_id);
        if let Some(key) = &self.internal_api_key {
            request
                .metadata_mut()
                .insert(INTERNAL_API_KEY_HEADER, key.clone());
        }

        let mut client = self.client.clone();
        let response = match with_timeout_result(self.timeout, client.validate_token(request)).await
        {
            Ok(response) => response.into_inner(),
            Err(CallError::Elapsed(after)) => {
                return Err(ValidationFailure::Unavailable(format!(
                    "ValidateToken timed out after {:?} (correlation_id={})",
                    after, correlation_id
                )));
            }
            Err(CallError::Failed(status)) => {
                return Err(ValidationFailure::Unavailable(format!(
                    "ValidateToken failed with {:?}: {} (correlation_id={})",
                    status.code(),
                    status.message(),
                    correlation_id
                )));
            }
        };

        if !response.valid {
            let reason = response
                .reason
                .filter(|reason| !reason.is_empty())
                .unwrap_or_else(|| "invalid token".to_string());
            return Err(ValidationFailure::Rejected(reason));
        }

        match response.user_id.filter(|id| !id.is_empty()) {
            Some(user_id) => Ok(Claims {
                user_id,
                email: response.email.unwrap_or_default(),
            }),
            None => Err(ValidationFailure::Rejected(
                "token missing subject".to_string(),
            )),
        }
    }
}
