pub mod items;

pub use items::{ItemService, PAGE_SIZE};
