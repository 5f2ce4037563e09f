use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crypto_core::SigningError;
use thiserror::Error;
use tonic::{Code, Status};

pub type Result<T> = std::result::Result<T, IdentityError>;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Token signing error: {0}")]
    Signing(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Convert to gRPC Status for wire protocol
    pub fn to_status(&self) -> Status {
        match self {
            IdentityError::Validation(msg) => {
                Status::new(Code::InvalidArgument, format!("Validation error: {}", msg))
            }
            IdentityError::EmailAlreadyExists => {
                Status::new(Code::AlreadyExists, "Email already exists")
            }
            IdentityError::InvalidCredentials => {
                Status::new(Code::Unauthenticated, "Invalid credentials")
            }
            IdentityError::StoreUnavailable(_) => {
                Status::new(Code::Unavailable, "Service temporarily unavailable")
            }
            IdentityError::Database(_) | IdentityError::Signing(_) | IdentityError::Internal(_) => {
                // Don't leak internal details
                Status::new(Code::Internal, "Internal server error")
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::Validation(_) => StatusCode::BAD_REQUEST,
            IdentityError::EmailAlreadyExists => StatusCode::CONFLICT,
            IdentityError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            IdentityError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            IdentityError::Database(_) | IdentityError::Signing(_) | IdentityError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to hand to callers
    pub fn public_message(&self) -> String {
        self.to_status().message().to_string()
    }
}

// Conversions from external error types
impl From<sqlx::Error> for IdentityError {
    fn from(err: sqlx::Error) -> Self {
        if db_pool::is_unique_violation(&err) {
            return IdentityError::EmailAlreadyExists;
        }
        if db_pool::is_transient(&err) {
            tracing::warn!(error = %err, "Database temporarily unavailable");
            return IdentityError::StoreUnavailable(err.to_string());
        }
        tracing::error!(error = %err, "Database error");
        IdentityError::Database(err.to_string())
    }
}

impl From<SigningError> for IdentityError {
    fn from(err: SigningError) -> Self {
        tracing::error!(error = %err, "Token signing failed");
        IdentityError::Signing(err.to_string())
    }
}

impl From<validator::ValidationErrors> for IdentityError {
    fn from(err: validator::ValidationErrors) -> Self {
        IdentityError::Validation(err.to_string())
    }
}

// gRPC Status conversion
impl From<axum::extract::rejection::JsonRejection> for IdentityError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        IdentityError::Validation(rejection.body_text())
    }
}

impl From<IdentityError> for Status {
    fn from(err: IdentityError) -> Self {
        err.to_status()
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.public_message(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}
