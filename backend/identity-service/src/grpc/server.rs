/// gRPC Server Implementation for Identity Service
///
/// Thin adapter over `services::IdentityService`: converts proto messages to
/// domain requests and `IdentityError` to `tonic::Status`.
use crate::grpc::{CorrelationId, GrpcInterceptor};
use crate::models::{LoginRequest, RegisterRequest};
use crate::services::{IdentityService, ValidationResult};
use std::sync::Arc;
use tonic::service::interceptor::InterceptedService;
use tonic::{Request, Response, Status};
use tracing::info;

pub mod proto {
    tonic::include_proto!("identity.v1");
}

use proto::identity_service_server::{
    IdentityService as IdentityServiceRpc, IdentityServiceServer,
};

#[derive(Clone)]
pub struct IdentityGrpcServer {
    identity: Arc<IdentityService>,
}

impl IdentityGrpcServer {
    pub fn new(identity: Arc<IdentityService>) -> Self {
        Self { identity }
    }
}

/// Server wrapped with the interceptor, ready for `Server::add_service`
pub fn grpc_service(
    identity: Arc<IdentityService>,
    internal_api_key: Option<String>,
) -> InterceptedService<IdentityServiceServer<IdentityGrpcServer>, GrpcInterceptor> {
    IdentityServiceServer::with_interceptor(
        IdentityGrpcServer::new(identity),
        GrpcInterceptor::new(internal_api_key),
    )
}

fn correlation_id<T>(request: &Request<T>) -> String {
    request
        .extensions()
        .get::<CorrelationId>()
        .map(|id| id.0.clone())
        .unwrap_or_default()
}

#[tonic::async_trait]
impl IdentityServiceRpc for IdentityGrpcServer {
    async fn register(
        &self,
        request: Request<proto::RegisterRequest>,
    ) -> Result<Response<proto::User>, Status> {
        let req = request.into_inner();

        let user = self
            .identity
            .register(RegisterRequest {
                email: req.email,
                password: req.password,
                display_name: req.display_name,
            })
            .await?;

        Ok(Response::new(proto::User {
            id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at.timestamp(),
        }))
    }

    async fn login(
        &self,
        request: Request<proto::LoginRequest>,
    ) -> Result<Response<proto::LoginResponse>, Status> {
        let req = request.into_inner();

        let issued = self
            .identity
            .login(LoginRequest {
                email: req.email,
                password: req.password,
            })
            .await?;

        Ok(Response::new(proto::LoginResponse {
            access_token: issued.access_token,
            expires_in: issued.expires_in,
        }))
    }

    async fn validate_token(
        &self,
        request: Request<proto::ValidateTokenRequest>,
    ) -> Result<Response<proto::ValidateTokenResponse>, Status> {
        let correlation_id = correlation_id(&request);
        let req = request.into_inner();

        let response = match self.identity.validate_token(&req.token) {
            ValidationResult::Valid { user_id, email } => {
                info!(correlation_id = %correlation_id, user_id = %user_id, "Token validated");
                proto::ValidateTokenResponse {
                    valid: true,
                    user_id: Some(user_id),
                    email: Some(email),
                    reason: None,
                }
            }
            ValidationResult::Invalid { reason } => {
                info!(correlation_id = %correlation_id, reason = %reason, "Token rejected");
                proto::ValidateTokenResponse {
                    valid: false,
                    user_id: None,
                    email: None,
                    reason: Some(reason),
                }
            }
        };

        Ok(Response::new(response))
    }
}
