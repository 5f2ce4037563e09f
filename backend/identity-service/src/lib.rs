/// Identity Service Library
///
/// Owns user credentials and access tokens for the platform.
///
/// ## Modules
///
/// - `config`: Service configuration
/// - `db`: User repositories (Postgres, in-memory)
/// - `error`: Error types and their gRPC/HTTP mappings
/// - `grpc`: gRPC server implementation
/// - `http`: HTTP+JSON API
/// - `models`: Data models
/// - `security`: Password hashing, token manager re-exports
/// - `services`: Registration, login, token validation
pub mod config;
pub mod db;
pub mod error;
pub mod grpc;
pub mod http;
pub mod models;
pub mod security;
pub mod services;

// Re-export commonly used types
pub use error::{IdentityError, Result};
pub use grpc::{grpc_service, IdentityGrpcServer};
pub use services::{IdentityService, ValidationResult};
