/// Ownership-scoped item operations
///
/// Every operation resolves the caller through the `Authorizer` before the
/// store is touched; the owner id used in each query is always the verified
/// subject, never anything supplied in the request body.
use crate::auth::Authorizer;
use crate::db::ItemRepository;
use crate::error::{AppError, Result};
use crate::models::Item;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

/// Fixed page size for `list_items`
pub const PAGE_SIZE: i64 = 50;

const INVALID_SUBJECT: &str = "invalid subject";
const ITEM: &str = "item";

/// Trimmed input; `None` means "not supplied"
#[derive(Debug, Validate)]
struct ItemFields {
    #[validate(length(min = 1, message = "name must not be empty"))]
    name: Option<String>,
    description: Option<String>,
}

impl ItemFields {
    fn new(name: Option<&str>, description: Option<&str>) -> Result<Self> {
        let fields = Self {
            name: name.map(|n| n.trim().to_string()),
            description: description.map(|d| d.trim().to_string()),
        };
        fields.validate()?;
        Ok(fields)
    }
}

#[derive(Clone)]
pub struct ItemService {
    authorizer: Authorizer,
    items: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(authorizer: Authorizer, items: Arc<dyn ItemRepository>) -> Self {
        Self { authorizer, items }
    }

    /// Resolve the credential to the owner id every query is scoped by
    async fn owner(&self, token: Option<&str>) -> Result<Uuid> {
        let claims = self.authorizer.authorize(token).await?;
        Uuid::parse_str(&claims.user_id).map_err(|_| {
            debug!(subject = %claims.user_id, "Token subject is not a UUID");
            AppError::Unauthorized(INVALID_SUBJECT.to_string())
        })
    }

    pub async fn create_item(
        &self,
        token: Option<&str>,
        name: &str,
        description: &str,
    ) -> Result<Item> {
        let owner_id = self.owner(token).await?;

        let fields = ItemFields::new(Some(name), Some(description))?;

        let item = self
            .items
            .create(
                owner_id,
                fields.name.as_deref().unwrap_or_default(),
                fields.description.as_deref().unwrap_or_default(),
            )
            .await?;
        info!(item_id = %item.id, owner_id = %owner_id, "Item created");
        Ok(item)
    }

    /// Newest first, `PAGE_SIZE` per page
    pub async fn list_items(&self, token: Option<&str>, offset: i64) -> Result<Vec<Item>> {
        let owner_id = self.owner(token).await?;
        self.items.list(owner_id, PAGE_SIZE, offset.max(0)).await
    }

    pub async fn get_item(&self, token: Option<&str>, item_id: &str) -> Result<Item> {
        let owner_id = self.owner(token).await?;
        let id = parse_item_id(item_id)?;

        self.items
            .get(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ITEM.to_string()))
    }

    /// Partial update; `None` fields keep their stored value
    pub async fn update_item(
        &self,
        token: Option<&str>,
        item_id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Item> {
        let owner_id = self.owner(token).await?;
        let id = parse_item_id(item_id)?;

        let fields = ItemFields::new(name, description)?;

        let item = self
            .items
            .update(
                id,
                owner_id,
                fields.name.as_deref(),
                fields.description.as_deref(),
            )
            .await?
            .ok_or_else(|| AppError::NotFound(ITEM.to_string()))?;
        info!(item_id = %item.id, owner_id = %owner_id, "Item updated");
        Ok(item)
    }

    pub async fn delete_item(&self, token: Option<&str>, item_id: &str) -> Result<()> {
        let owner_id = self.owner(token).await?;
        let id = parse_item_id(item_id)?;

        if !self.items.delete(id, owner_id).await? {
            return Err(AppError::NotFound(ITEM.to_string()));
        }
        info!(item_id = %id, owner_id = %owner_id, "Item deleted");
        Ok(())
    }
}

// A malformed id can never match a row
fn parse_item_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(ITEM.to_string()))
}
