// Shared fixtures for item-service integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use grpc_clients::GrpcConfig;
use identity_service::{
    db::InMemoryUserRepository, grpc_service, security::TokenManager, IdentityService,
};
use item_service::auth::{Authorizer, Claims, GrpcTokenValidator, TokenValidator, ValidationFailure};
use item_service::db::InMemoryItemRepository;
use item_service::ItemService;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

pub const ANN_ID: &str = "5b0f3c52-8f4e-4c0e-9a57-2f7c1a0e9b11";
pub const BOB_ID: &str = "0d7e5a1c-3b2f-4f6a-8c9d-1e2f3a4b5c6d";

mockall::mock! {
    pub Validator {}

    #[async_trait]
    impl TokenValidator for Validator {
        async fn validate(&self, token: &str) -> Result<Claims, ValidationFailure>;
    }
}

/// Validator that accepts the tokens "ann" and "bob" and rejects the rest
pub fn two_user_validator() -> MockValidator {
    let mut validator = MockValidator::new();
    validator.expect_validate().returning(|token| match token {
        "ann" => Ok(Claims {
            user_id: ANN_ID.into(),
            email: "a@x.com".into(),
        }),
        "bob" => Ok(Claims {
            user_id: BOB_ID.into(),
            email: "b@x.com".into(),
        }),
        _ => Err(ValidationFailure::Rejected("invalid token signature".into())),
    });
    validator
}

pub fn item_service(validator: impl TokenValidator + 'static) -> (ItemService, Arc<InMemoryItemRepository>) {
    let repo = Arc::new(InMemoryItemRepository::new());
    let service = ItemService::new(Authorizer::new(Arc::new(validator)), repo.clone());
    (service, repo)
}

/// identity-service running in-process on an ephemeral port
pub struct IdentityServer {
    pub addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl IdentityServer {
    pub async fn start(internal_api_key: Option<String>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();

        let identity = Arc::new(IdentityService::new(
            Arc::new(InMemoryUserRepository::new()),
            TokenManager::new("cross-service-secret", Duration::from_secs(3600)),
        ));
        let service = grpc_service(identity, internal_api_key);
        tokio::spawn(async move {
            Server::builder()
                .add_service(service)
                .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async {
                    let _ = rx.await;
                })
                .await
                .expect("identity test server");
        });

        Self {
            addr,
            _shutdown: tx,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

pub fn grpc_config(url: &str, request_timeout_ms: u64, internal_api_key: Option<&str>) -> GrpcConfig {
    GrpcConfig {
        identity_service_url: url.to_string(),
        connection_timeout_secs: 1,
        request_timeout_ms,
        internal_api_key: internal_api_key.map(str::to_string),
        ..GrpcConfig::development()
    }
}

pub fn remote_validator(config: &GrpcConfig) -> GrpcTokenValidator {
    GrpcTokenValidator::from_config(config).expect("valid identity endpoint")
}
