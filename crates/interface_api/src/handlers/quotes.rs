//! Quote handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Duration;
use core_kernel::{business_today, QuoteId};

use crate::dto::billing::{
    ConvertQuoteRequest, InvoiceResponse, ListQuotesParams, QuoteDraftRequest, QuoteResponse,
    QuoteTotalsDto,
};
use crate::{error::ApiError, AppState};

/// Creates a quote from a draft, assigning the next quote number
pub async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteDraftRequest>,
) -> Result<(StatusCode, Json<QuoteResponse>), ApiError> {
    let quote = state.billing.create_quote(request.into()).await?;
    let response = QuoteResponse::from_domain(&quote, business_today());
    Ok((StatusCode::CREATED, Json(response)))
}

/// Lists quotes, optionally filtered by client or status
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<ListQuotesParams>,
) -> Result<Json<Vec<QuoteResponse>>, ApiError> {
    let quotes = state.billing.list_quotes(params.into()).await?;
    let today = business_today();
    Ok(Json(
        quotes
            .iter()
            .map(|quote| QuoteResponse::from_domain(quote, today))
            .collect(),
    ))
}

/// Gets a quote by id
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let quote = state.billing.get_quote(id).await?;
    Ok(Json(QuoteResponse::from_domain(&quote, business_today())))
}

/// Re-applies a draft to an existing quote
pub async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
    Json(request): Json<QuoteDraftRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let quote = state.billing.update_quote(id, request.into()).await?;
    Ok(Json(QuoteResponse::from_domain(&quote, business_today())))
}

/// Deletes a quote
pub async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
) -> Result<StatusCode, ApiError> {
    state.billing.delete_quote(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Computes totals for a draft without saving anything
pub async fn preview_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteDraftRequest>,
) -> Json<QuoteTotalsDto> {
    let totals = state.billing.preview_quote(&request.into());
    Json(QuoteTotalsDto::from(totals))
}

/// Marks a quote as sent to the client
pub async fn send_quote(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let quote = state.billing.send_quote(id).await?;
    Ok(Json(QuoteResponse::from_domain(&quote, business_today())))
}

/// Marks a sent quote as accepted
pub async fn accept_quote(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let quote = state.billing.accept_quote(id).await?;
    Ok(Json(QuoteResponse::from_domain(&quote, business_today())))
}

/// Marks a sent quote as declined
pub async fn decline_quote(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let quote = state.billing.decline_quote(id).await?;
    Ok(Json(QuoteResponse::from_domain(&quote, business_today())))
}

/// Mints an invoice from an accepted quote
///
/// The invoice takes the quote's one-time items and tax snapshot and
/// gets the next invoice number. Due date defaults to thirty days out.
pub async fn convert_quote(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
    Json(request): Json<ConvertQuoteRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    let today = business_today();
    let due_date = request.due_date.unwrap_or(today + Duration::days(30));

    let invoice = state.billing.convert_quote(id, due_date).await?;
    let response = InvoiceResponse::from_domain(&invoice, today);
    Ok((StatusCode::CREATED, Json(response)))
}
