pub mod item;

pub use item::{CreateItemRequest, Item, ItemList, ListItemsQuery, UpdateItemRequest};
