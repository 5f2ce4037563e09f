pub mod user;

pub use user::{normalize_email, LoginRequest, NewUser, PublicUser, RegisterRequest, TokenResponse, User};
