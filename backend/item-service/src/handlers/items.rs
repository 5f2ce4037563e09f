/// Item handlers - HTTP endpoints for item operations
use crate::correlation;
use crate::error::Result;
use crate::models::{CreateItemRequest, ItemList, ListItemsQuery, UpdateItemRequest};
use crate::services::ItemService;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, HttpRequest, HttpResponse};

// Non-UTF-8 header values count as absent
fn credential(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Create an item owned by the caller
pub async fn create_item(
    service: web::Data<ItemService>,
    req: HttpRequest,
    body: web::Json<CreateItemRequest>,
) -> Result<HttpResponse> {
    correlation::scope(correlation::from_request(&req), async {
        let item = service
            .create_item(credential(&req), &body.name, &body.description)
            .await?;
        Ok(HttpResponse::Created().json(item))
    })
    .await
}

/// List the caller's items, newest first
pub async fn list_items(
    service: web::Data<ItemService>,
    req: HttpRequest,
    query: web::Query<ListItemsQuery>,
) -> Result<HttpResponse> {
    correlation::scope(correlation::from_request(&req), async {
        let items = service
            .list_items(credential(&req), query.offset.unwrap_or(0))
            .await?;
        Ok(HttpResponse::Ok().json(ItemList { items }))
    })
    .await
}

pub async fn get_item(
    service: web::Data<ItemService>,
    req: HttpRequest,
    item_id: web::Path<String>,
) -> Result<HttpResponse> {
    correlation::scope(correlation::from_request(&req), async {
        let item = service.get_item(credential(&req), &item_id).await?;
        Ok(HttpResponse::Ok().json(item))
    })
    .await
}

pub async fn update_item(
    service: web::Data<ItemService>,
    req: HttpRequest,
    item_id: web::Path<String>,
    body: web::Json<UpdateItemRequest>,
) -> Result<HttpResponse> {
    correlation::scope(correlation::from_request(&req), async {
        let item = service
            .update_item(
                credential(&req),
                &item_id,
                body.name.as_deref(),
                body.description.as_deref(),
            )
            .await?;
        Ok(HttpResponse::Ok().json(item))
    })
    .await
}

pub async fn delete_item(
    service: web::Data<ItemService>,
    req: HttpRequest,
    item_id: web::Path<String>,
) -> Result<HttpResponse> {
    correlation::scope(correlation::from_request(&req), async {
        service.delete_item(credential(&req), &item_id).await?;
        Ok(HttpResponse::NoContent().finish())
    })
    .await
}
