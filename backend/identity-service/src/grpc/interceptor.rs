use crypto_core::correlation::{self, GRPC_CORRELATION_ID_KEY};
use std::sync::Arc;
use tonic::{metadata::MetadataValue, service::Interceptor, Request, Status};

const INTERNAL_API_KEY_HEADER: &str = "x-internal-api-key";

/// Correlation id attached to every inbound call, read by handlers for logging
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

/// Echoes or generates a correlation id and, when configured, enforces the
/// shared internal API key.
#[derive(Clone, Default)]
pub struct GrpcInterceptor {
    internal_api_key: Option<Arc<str>>,
}

impl GrpcInterceptor {
    pub fn new(internal_api_key: Option<String>) -> Self {
        Self {
            internal_api_key: internal_api_key.map(Arc::from),
        }
    }
}

impl Interceptor for GrpcInterceptor {
    fn call(&mut self, mut req: Request<()>) -> Result<Request<()>, Status> {
        let correlation_id = match correlation::from_metadata(req.metadata()) {
            Some(existing) => existing,
            None => {
                let generated = correlation::new_correlation_id();
                let value = MetadataValue::try_from(generated.as_str())
                    .map_err(|_| Status::internal("failed to set correlation id"))?;
                req.metadata_mut().insert(GRPC_CORRELATION_ID_KEY, value);
                generated
            }
        };
        req.extensions_mut().insert(CorrelationId(correlation_id.clone()));

        if let Some(expected_key) = self.internal_api_key.as_deref() {
            let provided = req
                .metadata()
                .get(INTERNAL_API_KEY_HEADER)
                .and_then(|val| val.to_str().ok())
                .unwrap_or_default();
            if provided != expected_key {
                tracing::warn!(correlation_id = %correlation_id, "Rejected call with invalid internal api key");
                return Err(Status::unauthenticated("invalid internal api key"));
            }
        }

        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_correlation_id_when_absent() {
        let mut interceptor = GrpcInterceptor::default();
        let req = interceptor.call(Request::new(())).unwrap();

        let id = req.extensions().get::<CorrelationId>().unwrap();
        assert_eq!(id.0.len(), 36);
        assert_eq!(
            correlation::from_metadata(req.metadata()).as_deref(),
            Some(id.0.as_str())
        );
    }

    #[test]
    fn test_echoes_existing_correlation_id() {
        let mut interceptor = GrpcInterceptor::default();
        let mut req = Request::new(());
        correlation::inject_into_metadata(req.metadata_mut(), "req-42");

        let req = interceptor.call(req).unwrap();
        assert_eq!(req.extensions().get::<CorrelationId>().unwrap().0, "req-42");
    }

    #[test]
    fn test_api_key_enforced_when_configured() {
        let mut interceptor = GrpcInterceptor::new(Some("k3y".into()));

        let status = interceptor.call(Request::new(())).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);

        let mut req = Request::new(());
        req.metadata_mut()
            .insert(INTERNAL_API_KEY_HEADER, MetadataValue::from_static("k3y"));
        assert!(interceptor.call(req).is_ok());
    }
}
