//! Invoice handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use core_kernel::{business_today, InvoiceId};

use crate::dto::billing::{
    InvoiceDraftRequest, InvoiceResponse, ListInvoicesParams, TaxBreakdownDto,
};
use crate::{error::ApiError, AppState};

/// Creates an invoice from a draft, assigning the next invoice number
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<InvoiceDraftRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    let invoice = state.billing.create_invoice(request.into()).await?;
    let response = InvoiceResponse::from_domain(&invoice, business_today());
    Ok((StatusCode::CREATED, Json(response)))
}

/// Lists invoices, optionally filtered by client or status
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<ListInvoicesParams>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let invoices = state.billing.list_invoices(params.into()).await?;
    let today = business_today();
    Ok(Json(
        invoices
            .iter()
            .map(|invoice| InvoiceResponse::from_domain(invoice, today))
            .collect(),
    ))
}

/// Gets an invoice by id
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<InvoiceId>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = state.billing.get_invoice(id).await?;
    Ok(Json(InvoiceResponse::from_domain(&invoice, business_today())))
}

/// Re-applies a draft to an existing invoice
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<InvoiceId>,
    Json(request): Json<InvoiceDraftRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = state.billing.update_invoice(id, request.into()).await?;
    Ok(Json(InvoiceResponse::from_domain(&invoice, business_today())))
}

/// Deletes an invoice
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<InvoiceId>,
) -> Result<StatusCode, ApiError> {
    state.billing.delete_invoice(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Computes figures for a draft without saving anything
pub async fn preview_invoice(
    State(state): State<AppState>,
    Json(request): Json<InvoiceDraftRequest>,
) -> Json<TaxBreakdownDto> {
    let breakdown = state.billing.preview_invoice(&request.into());
    Json(TaxBreakdownDto::from(breakdown))
}

/// Marks an invoice as sent to the client
pub async fn send_invoice(
    State(state): State<AppState>,
    Path(id): Path<InvoiceId>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = state.billing.send_invoice(id).await?;
    Ok(Json(InvoiceResponse::from_domain(&invoice, business_today())))
}

/// Records payment in full
pub async fn pay_invoice(
    State(state): State<AppState>,
    Path(id): Path<InvoiceId>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = state.billing.mark_invoice_paid(id).await?;
    Ok(Json(InvoiceResponse::from_domain(&invoice, business_today())))
}

/// Voids an invoice without payment
pub async fn cancel_invoice(
    State(state): State<AppState>,
    Path(id): Path<InvoiceId>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = state.billing.cancel_invoice(id).await?;
    Ok(Json(InvoiceResponse::from_domain(&invoice, business_today())))
}
