/// Registration, login and token validation
use crate::db::UserRepository;
use crate::error::{IdentityError, Result};
use crate::models::{normalize_email, LoginRequest, NewUser, PublicUser, RegisterRequest};
use crate::security::{hash_password, verify_password, IssuedToken, TokenManager};
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

/// Outcome of `IdentityService::validate_token`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid { user_id: String, email: String },
    Invalid { reason: String },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }
}

#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    tokens: TokenManager,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenManager) -> Self {
        Self { users, tokens }
    }

    /// Create an account; the email must not already be registered
    pub async fn register(&self, request: RegisterRequest) -> Result<PublicUser> {
        let request = request.normalized();
        request.validate()?;

        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| IdentityError::Internal(format!("hashing task failed: {}", e)))??;

        let user = self
            .users
            .create(NewUser {
                email: request.email,
                password_hash,
                display_name: request.display_name,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user.to_public())
    }

    /// Exchange credentials for an access token
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, request: LoginRequest) -> Result<IssuedToken> {
        let email = normalize_email(&request.email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(IdentityError::InvalidCredentials);
        };

        let password = request.password;
        let password_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
                .await
                .map_err(|e| IdentityError::Internal(format!("verification task failed: {}", e)))??;

        if !matches {
            warn!(user_id = %user.id, "Login failed: password mismatch");
            return Err(IdentityError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&user.id.to_string(), &user.email)?;
        info!(user_id = %user.id, "User logged in");
        Ok(issued)
    }

    /// Never fails; rejection is reported in the result
    pub fn validate_token(&self, token: &str) -> ValidationResult {
        match self.tokens.validate(token.trim()) {
            Ok(claims) => ValidationResult::Valid {
                user_id: claims.user_id,
                email: claims.email,
            },
            Err(reason) => {
                debug!(reason = %reason, "Token rejected");
                ValidationResult::Invalid {
                    reason: reason.to_string(),
                }
            }
        }
    }
}
