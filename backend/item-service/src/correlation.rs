//! Per-request correlation id, visible to outbound calls made while
//! handling the request.
use actix_web::HttpRequest;
use crypto_core::correlation::{new_correlation_id, HTTP_CORRELATION_ID_HEADER};
use std::future::Future;

tokio::task_local! {
    static CORRELATION_ID: String;
}

/// Inbound `x-correlation-id`, or a fresh id when absent
pub fn from_request(req: &HttpRequest) -> String {
    req.headers()
        .get(HTTP_CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(new_correlation_id)
}

/// Run `fut` with `id` as the current correlation id
pub async fn scope<F: Future>(id: String, fut: F) -> F::Output {
    CORRELATION_ID.scope(id, fut).await
}

pub fn current() -> Option<String> {
    CORRELATION_ID.try_with(Clone::clone).ok()
}
