//! Service catalog handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use core_kernel::CatalogItemId;
use domain_billing::CatalogItem;

use crate::dto::billing::{CatalogItemRequest, CatalogItemResponse, LineItemDto, ListCatalogParams};
use crate::{error::ApiError, AppState};

/// Adds a reusable service to the catalog
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CatalogItemRequest>,
) -> Result<(StatusCode, Json<CatalogItemResponse>), ApiError> {
    let mut item = CatalogItem::new(request.name, request.unit_price, request.billing);
    item.description = request.description;
    item.category = request.category;

    state.billing.save_catalog_item(&item).await?;
    let saved = state.billing.get_catalog_item(item.id).await?;
    Ok((StatusCode::CREATED, Json(CatalogItemResponse::from(&saved))))
}

/// Lists catalog items, optionally filtered by cadence or category
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListCatalogParams>,
) -> Result<Json<Vec<CatalogItemResponse>>, ApiError> {
    let items = state.billing.list_catalog_items(params.into()).await?;
    Ok(Json(items.iter().map(CatalogItemResponse::from).collect()))
}

/// Gets a catalog item by id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<CatalogItemId>,
) -> Result<Json<CatalogItemResponse>, ApiError> {
    let item = state.billing.get_catalog_item(id).await?;
    Ok(Json(CatalogItemResponse::from(&item)))
}

/// Replaces a catalog item's editable fields
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<CatalogItemId>,
    Json(request): Json<CatalogItemRequest>,
) -> Result<Json<CatalogItemResponse>, ApiError> {
    let mut item = state.billing.get_catalog_item(id).await?;
    item.name = request.name;
    item.description = request.description;
    item.unit_price = request.unit_price;
    item.billing = request.billing;
    item.category = request.category;

    state.billing.save_catalog_item(&item).await?;
    let saved = state.billing.get_catalog_item(id).await?;
    Ok(Json(CatalogItemResponse::from(&saved)))
}

/// Removes a catalog item. Documents that already copied it are
/// unaffected.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<CatalogItemId>,
) -> Result<StatusCode, ApiError> {
    state.billing.delete_catalog_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pre-fills a line item from a catalog entry, ready to drop into a
/// draft
pub async fn prefill_line_item(
    State(state): State<AppState>,
    Path(id): Path<CatalogItemId>,
) -> Result<Json<LineItemDto>, ApiError> {
    let item = state.billing.get_catalog_item(id).await?;
    Ok(Json(LineItemDto::from(&item.to_line_item())))
}
