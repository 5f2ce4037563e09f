/// HTTP+JSON API for identity-service
///
/// Mirrors the gRPC surface for clients that cannot speak gRPC.
use crate::error::IdentityError;
use crate::models::{LoginRequest, PublicUser, RegisterRequest, TokenResponse};
use crate::services::{IdentityService, ValidationResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Shared HTTP server state
#[derive(Clone)]
pub struct HttpServerState {
    pub identity: Arc<IdentityService>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateTokenBody {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateTokenReply {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<ValidationResult> for ValidateTokenReply {
    fn from(result: ValidationResult) -> Self {
        match result {
            ValidationResult::Valid { user_id, email } => Self {
                valid: true,
                user_id: Some(user_id),
                email: Some(email),
                reason: None,
            },
            ValidationResult::Invalid { reason } => Self {
                valid: false,
                user_id: None,
                email: None,
                reason: Some(reason),
            },
        }
    }
}

/// Build the HTTP router
pub fn build_router(state: HttpServerState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/identity/register", post(register))
        .route("/v1/identity/login", post(login))
        .route("/v1/identity/validate", post(validate))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn register(
    State(state): State<HttpServerState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicUser>), IdentityError> {
    let Json(request) = payload?;
    let user = state.identity.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<HttpServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, IdentityError> {
    let Json(request) = payload?;
    let issued = state.identity.login(request).await?;
    Ok(Json(TokenResponse {
        access_token: issued.access_token,
        expires_in: issued.expires_in,
    }))
}

async fn validate(
    State(state): State<HttpServerState>,
    payload: Result<Json<ValidateTokenBody>, JsonRejection>,
) -> Result<Json<ValidateTokenReply>, IdentityError> {
    let Json(body) = payload?;
    Ok(Json(state.identity.validate_token(&body.token).into()))
}

/// Serve the HTTP API on `listener` until `shutdown` resolves
pub async fn serve(
    state: HttpServerState,
    listener: tokio::net::TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = build_router(state);
    info!(addr = ?listener.local_addr().ok(), "Starting HTTP API server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
