/// gRPC server module for identity-service
///
/// Exports:
/// - IdentityGrpcServer: tonic implementation of `identity.v1.IdentityService`
/// - GrpcInterceptor: correlation id + internal API key checks
/// - proto: Generated protobuf types from identity_service.proto
pub mod interceptor;
pub mod server;

pub use interceptor::{CorrelationId, GrpcInterceptor};
pub use server::{grpc_service, proto, IdentityGrpcServer};
