//! Authorization gateway
//!
//! item-service never sees the signing secret. Every request's bearer token
//! is sent to identity-service through a `TokenValidator`, and the outcome is
//! turned into either `Claims` or `AppError::Unauthorized`.
pub mod gateway;
pub mod remote;

pub use crypto_core::Claims;
pub use gateway::{extract_bearer, Authorizer};
pub use remote::GrpcTokenValidator;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// identity-service answered and said no; carries its reason
    #[error("{0}")]
    Rejected(String),

    /// identity-service could not be asked (unreachable, timed out, refused)
    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

/// Remote token validation capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<Claims, ValidationFailure>;
}
