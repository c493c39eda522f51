use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::core::error::Result;
use crate::features::ticket_categories::dtos::ItemsByCategoryDto;
use crate::features::ticket_categories::services::TicketCategoryService;
use crate::shared::types::ApiResponse;

#[derive(Debug, Deserialize, IntoParams)]
pub struct TicketCategoriesQuery {
    /// Promo, access or special price code
    pub code: Option<String>,
}

/// List ticket categories and additional services of an event
#[utoipa::path(
    get,
    path = "/api/v2/public/event/{event_name}/ticket-categories",
    params(
        ("event_name" = String, Path, description = "Event short name"),
        TicketCategoriesQuery
    ),
    responses(
        (status = 200, description = "Items on sale", body = ApiResponse<ItemsByCategoryDto>),
        (status = 404, description = "Event not found or disabled")
    ),
    tag = "ticket-categories"
)]
pub async fn list_ticket_categories(
    State(service): State<Arc<TicketCategoryService>>,
    Path(event_name): Path<String>,
    Query(query): Query<TicketCategoriesQuery>,
) -> Result<Json<ApiResponse<ItemsByCategoryDto>>> {
    let items = service
        .list_items(&event_name, query.code.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(Some(items), None, None)))
}
