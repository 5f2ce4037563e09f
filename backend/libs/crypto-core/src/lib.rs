//! Shared security primitives for the identity stack
//!
//! - `jwt`: HS256 token issuance and validation (`TokenManager`)
//! - `correlation`: correlation id propagation across HTTP and gRPC hops
pub mod correlation;
pub mod jwt;

pub use jwt::{Claims, InvalidToken, IssuedToken, SigningError, TokenManager};
