/// Identity Service Main Entry Point
///
/// Starts the gRPC and HTTP servers with:
/// - PostgreSQL connection pool
/// - HS256 token manager
/// - Cooperative shutdown on SIGINT/SIGTERM with a bounded grace period
use anyhow::{Context, Result};
use identity_service::{
    config::Settings,
    db::PgUserRepository,
    grpc_service,
    http::{self, HttpServerState},
    security::TokenManager,
    IdentityService,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{signal, sync::watch};
use tonic::transport::Server;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "identity_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting Identity Service");

    let settings = Settings::load().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    let db_pool = db_pool::create_pool(&settings.database.pool_config())
        .await
        .context("Failed to connect to PostgreSQL")?;

    if settings.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Database migrations completed");
    }

    let tokens = TokenManager::new(&settings.jwt.secret, settings.jwt.ttl());
    let identity = Arc::new(IdentityService::new(
        Arc::new(PgUserRepository::new(db_pool)),
        tokens,
    ));

    let grpc_addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.grpc_port)
        .parse()
        .context("Invalid gRPC server address")?;
    let http_addr = format!("{}:{}", settings.server.host, settings.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", http_addr))?;

    if settings.internal_grpc_api_key.is_none() {
        warn!("INTERNAL_GRPC_API_KEY not set - gRPC calls are not key-checked");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    info!("Starting gRPC server on {}", grpc_addr);
    let grpc = {
        let service = grpc_service(Arc::clone(&identity), settings.internal_grpc_api_key.clone());
        let shutdown = wait_for_shutdown(shutdown_rx.clone());
        async move {
            Server::builder()
                .add_service(service)
                .serve_with_shutdown(grpc_addr, shutdown)
                .await
                .context("gRPC server error")
        }
    };

    let http = {
        let state = HttpServerState {
            identity: Arc::clone(&identity),
        };
        let shutdown = wait_for_shutdown(shutdown_rx.clone());
        async move {
            http::serve(state, http_listener, shutdown)
                .await
                .context("HTTP server error")
        }
    };

    let grace = settings.server.shutdown_grace();
    let grace_elapsed = async move {
        wait_for_shutdown(shutdown_rx).await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = async { tokio::try_join!(grpc, http) } => {
            result?;
        }
        _ = grace_elapsed => {
            warn!(grace_secs = grace.as_secs(), "Shutdown grace period elapsed, abandoning in-flight requests");
        }
    }

    info!("Identity service shutdown complete");

    Ok(())
}

async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    // A dropped sender also means shutdown.
    let _ = rx.wait_for(|stop| *stop).await;
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutting down gracefully...");
}
