/// Item Service Main Entry Point
///
/// Starts the actix-web HTTP server with:
/// - PostgreSQL connection pool
/// - Lazy gRPC channel to identity-service for token validation
/// - Graceful shutdown on SIGINT/SIGTERM (actix `shutdown_timeout`)
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use item_service::{
    auth::{Authorizer, GrpcTokenValidator},
    config::Config,
    db::PgItemRepository,
    handlers, ItemService,
};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "item_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting Item Service");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        identity_service_url = %config.grpc.identity_service_url,
        "Configuration loaded successfully"
    );

    let db_pool = db_pool::create_pool(&config.database)
        .await
        .context("Failed to connect to PostgreSQL")?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Database migrations completed");
    }

    let validator = GrpcTokenValidator::from_config(&config.grpc)
        .context("Failed to configure identity-service client")?;
    let service = ItemService::new(
        Authorizer::new(Arc::new(validator)),
        Arc::new(PgItemRepository::new(db_pool.clone())),
    );

    let service_data = web::Data::new(service);
    let pool_data = web::Data::new(db_pool);
    let (host, port) = config.app.bind_address();
    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(service_data.clone())
            .app_data(pool_data.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure_health)
            .configure(handlers::configure_items)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind HTTP listener on {}:{}", host, port))?
    .shutdown_timeout(config.app.shutdown_grace_secs)
    .run()
    .await
    .context("HTTP server error")?;

    info!("Item service shutdown complete");

    Ok(())
}
