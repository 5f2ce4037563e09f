use actix_web::{web, HttpResponse};
use resilience::{with_timeout, DEFAULT_CALL_TIMEOUT};
use serde_json::json;
use sqlx::PgPool;

/// Readiness: the item store answers a trivial query
pub async fn health_check(pool: web::Data<PgPool>) -> HttpResponse {
    let probe = with_timeout(
        DEFAULT_CALL_TIMEOUT,
        sqlx::query("SELECT 1").execute(pool.get_ref()),
    )
    .await;

    match probe {
        Ok(Ok(_)) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "service": "item-service",
            "database": "ok",
        })),
        Ok(Err(e)) => unhealthy(&e.to_string()),
        Err(e) => unhealthy(&e.to_string()),
    }
}

fn unhealthy(cause: &str) -> HttpResponse {
    tracing::warn!(error = %cause, "Health check failed: database unreachable");
    HttpResponse::ServiceUnavailable().json(json!({
        "status": "unhealthy",
        "service": "item-service",
        "database": "unavailable",
    }))
}

pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "alive" }))
}
