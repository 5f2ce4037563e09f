/// Credential store for identity-service
pub mod memory;
pub mod users;

pub use memory::InMemoryUserRepository;
pub use users::{PgUserRepository, UserRepository};

#[cfg(test)]
pub use users::MockUserRepository;
