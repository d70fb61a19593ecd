//! Admin content handlers
//!
//! Documents travel in their stored shape; edits are merge patches.
//! Sample placeholders show up in listings like everything else but
//! refuse writes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain_content::ContentDoc;
use serde_json::Value;

use crate::dto::content::{build_document, parse_doc_id, parse_kind};
use crate::{error::ApiError, AppState};

/// Lists every document of a kind, drafts included. An empty store
/// lists the samples, so the editor sees what visitors currently see.
pub async fn list_documents(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<ContentDoc>>, ApiError> {
    let kind = parse_kind(&kind)?;
    Ok(Json(state.content.list_documents(kind).await?))
}

/// Creates a document of the kind named in the path
pub async fn create_document(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ContentDoc>), ApiError> {
    let kind = parse_kind(&kind)?;
    let doc = build_document(kind, body)?;
    let created = state.content.create_document(doc).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Gets one document by id, sample slugs included
pub async fn get_document(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<ContentDoc>, ApiError> {
    let kind = parse_kind(&kind)?;
    let doc = state.content.get_document(&parse_doc_id(&id)).await?;
    if doc.kind() != kind {
        return Err(ApiError::NotFound(format!("{kind} document {id}")));
    }
    Ok(Json(doc))
}

/// Applies a merge patch to a stored document
pub async fn patch_document(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Result<Json<ContentDoc>, ApiError> {
    parse_kind(&kind)?;
    let doc = state
        .content
        .update_document(&parse_doc_id(&id), patch)
        .await?;
    Ok(Json(doc))
}

/// Deletes a stored document. Deleting what is already gone is fine;
/// deleting a sample is not.
pub async fn delete_document(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    parse_kind(&kind)?;
    state.content.delete_document(&parse_doc_id(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
