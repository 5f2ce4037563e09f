use super::{Claims, TokenValidator, ValidationFailure};
use crate::error::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, warn};

pub const MISSING_CREDENTIAL: &str = "missing credential";
pub const VALIDATOR_UNAVAILABLE: &str = "authorization service unavailable";

/// Pull the token out of an `Authorization` header value
///
/// Accepts `Bearer <token>` with any casing of the scheme, or a bare token.
pub fn extract_bearer(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let token = match raw.split_once(|c: char| c.is_ascii_whitespace()) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };

    (!token.is_empty()).then_some(token)
}

/// Resolves a raw credential into verified claims, failing closed
#[derive(Clone)]
pub struct Authorizer {
    validator: Arc<dyn TokenValidator>,
}

impl Authorizer {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }

    pub async fn authorize(&self, raw: Option<&str>) -> Result<Claims> {
        let Some(token) = raw.and_then(extract_bearer) else {
            return Err(AppError::Unauthorized(MISSING_CREDENTIAL.to_string()));
        };

        match self.validator.validate(token).await {
            Ok(claims) => Ok(claims),
            Err(ValidationFailure::Rejected(reason)) => {
                debug!(reason = %reason, "Credential rejected by identity-service");
                Err(AppError::Unauthorized(reason))
            }
            Err(ValidationFailure::Unavailable(cause)) => {
                warn!(cause = %cause, "Token validation unavailable, denying request");
                Err(AppError::Unauthorized(VALIDATOR_UNAVAILABLE.to_string()))
            }
        }
    }
}
