/// HTTP handlers
///
/// - Items: owner-scoped CRUD under `/v1/items`, bearer token in `Authorization`
/// - Health: liveness and Postgres readiness under `/api/v1/health`
pub mod health;
pub mod items;

use crate::error::AppError;
use actix_web::web;

pub use health::{health_check, liveness};
pub use items::{create_item, delete_item, get_item, list_items, update_item};

/// Body parse failures answer with the usual `{error, status}` shape
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

/// Item routes; expects `web::Data<ItemService>` on the app
pub fn configure_items(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/items")
            .app_data(json_config())
            .app_data(query_config())
            .route("", web::post().to(create_item))
            .route("", web::get().to(list_items))
            .route("/{item_id}", web::get().to(get_item))
            .route("/{item_id}", web::patch().to(update_item))
            .route("/{item_id}", web::delete().to(delete_item)),
    );
}

/// Health routes; readiness expects `web::Data<PgPool>` on the app
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/health")
            .route("", web::get().to(health_check))
            .route("/live", web::get().to(liveness)),
    );
}
