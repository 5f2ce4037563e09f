/// Item persistence
pub mod item_repo;
pub mod memory;

pub use item_repo::{ItemRepository, PgItemRepository};
pub use memory::InMemoryItemRepository;
