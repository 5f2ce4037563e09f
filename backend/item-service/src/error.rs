/// Error types for Item Service
///
/// Errors are converted to HTTP responses with a JSON body
/// `{"error": <message>, "status": <code>}`. Infrastructure details stay in
/// the logs; callers only see fixed messages.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for item-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Carries the gateway's reason verbatim
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Store unreachable; safe for the caller to retry
    #[error("Storage unavailable: {0}")]
    TransientStore(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message safe to hand to callers
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => format!("Validation error: {}", msg),
            AppError::Unauthorized(reason) => reason.clone(),
            AppError::NotFound(what) => format!("{} not found", what),
            AppError::TransientStore(_) => "Service temporarily unavailable".to_string(),
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::TransientStore(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.public_message(),
            "status": status.as_u16(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if db_pool::is_transient(&err) {
            tracing::warn!(error = %err, "Item store temporarily unavailable");
            return AppError::TransientStore(err.to_string());
        }
        tracing::error!(error = %err, "Item store error");
        AppError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::ValidationError("name".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("missing credential".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("item".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::TransientStore("pool timed out".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::DatabaseError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_error_body_hides_internals() {
        let response = AppError::DatabaseError("relation items does not exist".into())
            .error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["status"], 500);
    }

    #[actix_web::test]
    async fn test_unauthorized_body_is_reason_only() {
        let response = AppError::Unauthorized("token expired".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "token expired");
        assert_eq!(json["status"], 401);
    }

    #[test]
    fn test_transient_sqlx_errors() {
        assert!(matches!(
            AppError::from(sqlx::Error::PoolTimedOut),
            AppError::TransientStore(_)
        ));
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::DatabaseError(_)
        ));
    }
}
