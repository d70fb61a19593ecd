//! Client handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use core_kernel::ClientId;

use crate::dto::client::{ClientRequest, ClientResponse, ListClientsParams};
use crate::{error::ApiError, AppState};

/// Creates a client record
pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<ClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>), ApiError> {
    let client = state.clients.create_client(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ClientResponse::from(&client))))
}

/// Lists clients, optionally filtered by a search string
pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<ListClientsParams>,
) -> Result<Json<Vec<ClientResponse>>, ApiError> {
    let clients = state.clients.list_clients(params.into()).await?;
    Ok(Json(clients.iter().map(ClientResponse::from).collect()))
}

/// Gets a client by id
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = state.clients.get_client(id).await?;
    Ok(Json(ClientResponse::from(&client)))
}

/// Replaces a client's editable fields
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
    Json(request): Json<ClientRequest>,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = state.clients.update_client(id, request.into()).await?;
    Ok(Json(ClientResponse::from(&client)))
}

/// Deletes a client record. Their documents keep the dangling id; the
/// books stay intact.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<StatusCode, ApiError> {
    state.clients.delete_client(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
