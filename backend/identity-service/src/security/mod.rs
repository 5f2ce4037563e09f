/// Security primitives for identity-service
///
/// Token handling lives in `crypto-core` so the same claims layout is shared
/// with every consumer; this module re-exports it next to password hashing.
pub mod password;

pub use crypto_core::jwt::{Claims, InvalidToken, IssuedToken, TokenManager};
pub use password::{hash_password, verify_password};
