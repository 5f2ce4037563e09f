//! Correlation ID utilities for distributed tracing
//!
//! ```text
//! Client HTTP Request
//!   ↓ (x-correlation-id header, generated when absent)
//! item-service handler
//!   ↓ (correlation-id gRPC metadata)
//! identity-service interceptor (logs it with the validation outcome)
//! ```
use tonic::metadata::{MetadataMap, MetadataValue};
use uuid::Uuid;

/// gRPC metadata key for correlation ID
pub const GRPC_CORRELATION_ID_KEY: &str = "correlation-id";

/// HTTP header for correlation ID
pub const HTTP_CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Generate a new correlation ID
pub fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Read the correlation ID from incoming gRPC metadata
pub fn from_metadata(metadata: &MetadataMap) -> Option<String> {
    metadata
        .get(GRPC_CORRELATION_ID_KEY)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Attach `correlation_id` to outgoing gRPC metadata; invalid values are dropped
pub fn inject_into_metadata(metadata: &mut MetadataMap, correlation_id: &str) {
    if let Ok(value) = MetadataValue::try_from(correlation_id) {
        metadata.insert(GRPC_CORRELATION_ID_KEY, value);
    }
}
