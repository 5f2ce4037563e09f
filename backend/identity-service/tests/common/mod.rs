// Shared fixtures for identity-service integration tests
#![allow(dead_code)]

use identity_service::{
    db::InMemoryUserRepository, grpc::proto::identity_service_client::IdentityServiceClient,
    grpc_service, security::TokenManager, IdentityService,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::{Channel, Server};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn identity_service() -> Arc<IdentityService> {
    Arc::new(IdentityService::new(
        Arc::new(InMemoryUserRepository::new()),
        TokenManager::new(TEST_SECRET, Duration::from_secs(3600)),
    ))
}

/// In-process gRPC server on an ephemeral port; dropping the handle stops it
pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    pub async fn start(internal_api_key: Option<String>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();

        let service = grpc_service(identity_service(), internal_api_key);
        tokio::spawn(async move {
            Server::builder()
                .add_service(service)
                .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async {
                    let _ = rx.await;
                })
                .await
                .expect("test gRPC server");
        });

        Self {
            addr,
            _shutdown: tx,
        }
    }

    pub async fn client(&self) -> IdentityServiceClient<Channel> {
        IdentityServiceClient::connect(format!("http://{}", self.addr))
            .await
            .expect("connect to test server")
    }
}
