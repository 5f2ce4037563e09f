use crate::db::ItemRepository;
use crate::error::Result;
use crate::models::Item;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local item store with the same owner scoping as `PgItemRepository`
///
/// Counts every call so tests can assert the store was never touched.
#[derive(Default)]
pub struct InMemoryItemRepository {
    // Insertion order; newest last
    items: RwLock<Vec<Item>>,
    calls: AtomicUsize,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository operations performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, owner_id: Uuid, name: &str, description: &str) -> Result<Item> {
        self.record_call();
        let item = Item {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        };
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn list(&self, owner_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Item>> {
        self.record_call();
        let items = self.items.read().await;
        Ok(items
            .iter()
            .rev()
            .filter(|item| item.owner_id == owner_id)
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Item>> {
        self.record_call();
        let items = self.items.read().await;
        Ok(items
            .iter()
            .find(|item| item.id == id && item.owner_id == owner_id)
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Item>> {
        self.record_call();
        let mut items = self.items.write().await;
        let Some(item) = items
            .iter_mut()
            .find(|item| item.id == id && item.owner_id == owner_id)
        else {
            return Ok(None);
        };

        if let Some(name) = name {
            item.name = name.to_string();
        }
        if let Some(description) = description {
            item.description = description.to_string();
        }
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool> {
        self.record_call();
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| !(item.id == id && item.owner_id == owner_id));
        Ok(items.len() < before)
    }
}
