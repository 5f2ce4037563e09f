//! Item Service Library
//!
//! Ownership-scoped item CRUD over HTTP. Every request's bearer token is
//! validated by identity-service over gRPC; this service never holds the
//! signing secret.
pub mod auth;
pub mod config;
pub mod correlation;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use services::ItemService;
