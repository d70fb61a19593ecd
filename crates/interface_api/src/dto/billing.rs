//! Billing DTOs
//!
//! Wire shapes for quotes, invoices, and the service catalog. Requests
//! stay loose so the editor can round-trip half-finished drafts; the
//! domain decides what is actually valid. Money serializes as decimal
//! strings to keep cents exact.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{CatalogItemId, ClientId, InvoiceId, LineItemKey, Percent, QuoteId};
use domain_billing::{
    BillingType, CatalogItem, CatalogQuery, Invoice, InvoiceDisplayStatus, InvoiceDraft,
    InvoiceQuery, InvoiceStatus, LineItem, Quote, QuoteDisplayStatus, QuoteDraft, QuoteQuery,
    QuoteStatus, QuoteTotals, TaxBreakdown, TaxConfig,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================
// Line items
// ============================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub is_tax_exempt: bool,
}

fn default_quantity() -> i64 {
    1
}

impl From<LineItemInput> for LineItem {
    fn from(input: LineItemInput) -> Self {
        let mut item = LineItem::new(input.name, input.quantity, input.unit_price)
            .with_discount(input.discount_percent);
        item.description = input.description;
        item.is_tax_exempt = input.is_tax_exempt;
        item
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDto {
    pub key: LineItemKey,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
    pub is_tax_exempt: bool,
    pub total: Decimal,
}

impl From<&LineItem> for LineItemDto {
    fn from(item: &LineItem) -> Self {
        Self {
            key: item.key,
            name: item.name.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount_percent: item.discount_percent.value(),
            is_tax_exempt: item.is_tax_exempt,
            total: item.total,
        }
    }
}

// ============================================================
// Tax configuration and derived figures
// ============================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfigInput {
    #[serde(default)]
    pub tax_enabled: bool,
    #[serde(default)]
    pub tax_rate_percent: Decimal,
    #[serde(default)]
    pub jurisdiction_exemption_enabled: bool,
}

impl From<TaxConfigInput> for TaxConfig {
    fn from(input: TaxConfigInput) -> Self {
        TaxConfig {
            enabled: input.tax_enabled,
            rate_percent: Percent::new(input.tax_rate_percent),
            data_processing_exemption: input.jurisdiction_exemption_enabled,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfigDto {
    pub tax_enabled: bool,
    pub tax_rate_percent: Decimal,
    pub jurisdiction_exemption_enabled: bool,
}

impl From<&TaxConfig> for TaxConfigDto {
    fn from(tax: &TaxConfig) -> Self {
        Self {
            tax_enabled: tax.enabled,
            tax_rate_percent: tax.rate_percent.value(),
            jurisdiction_exemption_enabled: tax.data_processing_exemption,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdownDto {
    pub subtotal: Decimal,
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

impl From<TaxBreakdown> for TaxBreakdownDto {
    fn from(breakdown: TaxBreakdown) -> Self {
        Self {
            subtotal: breakdown.subtotal,
            taxable_amount: breakdown.taxable_amount,
            tax_amount: breakdown.tax_amount,
            grand_total: breakdown.grand_total,
        }
    }
}

/// Quote totals flattened to the wire shape editors bind against
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotalsDto {
    pub one_time_subtotal: Decimal,
    pub one_time_tax_amount: Decimal,
    pub one_time_grand_total: Decimal,
    pub monthly_subtotal: Decimal,
    pub monthly_tax_amount: Decimal,
    pub monthly_grand_total: Decimal,
    pub combined_tax_amount: Decimal,
    pub grand_total: Decimal,
}

impl From<QuoteTotals> for QuoteTotalsDto {
    fn from(totals: QuoteTotals) -> Self {
        Self {
            one_time_subtotal: totals.one_time.subtotal,
            one_time_tax_amount: totals.one_time.tax_amount,
            one_time_grand_total: totals.one_time.grand_total,
            monthly_subtotal: totals.monthly.subtotal,
            monthly_tax_amount: totals.monthly.tax_amount,
            monthly_grand_total: totals.monthly.grand_total,
            combined_tax_amount: totals.combined_tax_amount,
            grand_total: totals.grand_total,
        }
    }
}

// ============================================================
// Quotes
// ============================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraftRequest {
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub tax: TaxConfigInput,
    #[serde(default)]
    pub one_time_items: Vec<LineItemInput>,
    #[serde(default)]
    pub recurring_items: Vec<LineItemInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<QuoteDraftRequest> for QuoteDraft {
    fn from(request: QuoteDraftRequest) -> Self {
        QuoteDraft {
            client_id: request.client_id,
            title: request.title,
            valid_until: request.valid_until,
            tax: request.tax.into(),
            one_time_items: request.one_time_items.into_iter().map(Into::into).collect(),
            recurring_items: request.recurring_items.into_iter().map(Into::into).collect(),
            notes: request.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub id: QuoteId,
    pub quote_number: String,
    pub client_id: ClientId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: QuoteStatus,
    pub display_status: QuoteDisplayStatus,
    pub valid_until: NaiveDate,
    pub one_time_items: Vec<LineItemDto>,
    pub recurring_items: Vec<LineItemDto>,
    pub tax: TaxConfigDto,
    pub totals: QuoteTotalsDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuoteResponse {
    /// Builds the response view of a quote as of `today`, which decides
    /// whether a sent quote displays as expired.
    pub fn from_domain(quote: &Quote, today: NaiveDate) -> Self {
        Self {
            id: quote.id,
            quote_number: quote.quote_number.clone(),
            client_id: quote.client_id,
            title: quote.title.clone(),
            status: quote.status,
            display_status: quote.display_status(today),
            valid_until: quote.valid_until,
            one_time_items: quote.one_time_items.iter().map(LineItemDto::from).collect(),
            recurring_items: quote.recurring_items.iter().map(LineItemDto::from).collect(),
            tax: TaxConfigDto::from(&quote.tax),
            totals: QuoteTotalsDto::from(quote.totals),
            notes: quote.notes.clone(),
            sent_at: quote.sent_at,
            created_at: quote.created_at,
            updated_at: quote.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuotesParams {
    pub client_id: Option<ClientId>,
    pub status: Option<QuoteStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<ListQuotesParams> for QuoteQuery {
    fn from(params: ListQuotesParams) -> Self {
        QuoteQuery {
            client_id: params.client_id,
            status: params.status,
            limit: params.limit,
            offset: params.offset,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertQuoteRequest {
    /// Payment due date for the minted invoice; defaults to net-30
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

// ============================================================
// Invoices
// ============================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraftRequest {
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tax: TaxConfigInput,
    #[serde(default)]
    pub items: Vec<LineItemInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<InvoiceDraftRequest> for InvoiceDraft {
    fn from(request: InvoiceDraftRequest) -> Self {
        InvoiceDraft {
            client_id: request.client_id,
            title: request.title,
            due_date: request.due_date,
            tax: request.tax.into(),
            items: request.items.into_iter().map(Into::into).collect(),
            notes: request.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub client_id: ClientId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_quote: Option<QuoteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: InvoiceStatus,
    pub display_status: InvoiceDisplayStatus,
    pub due_date: NaiveDate,
    pub items: Vec<LineItemDto>,
    pub tax: TaxConfigDto,
    pub totals: TaxBreakdownDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvoiceResponse {
    /// Builds the response view of an invoice as of `today`, which
    /// decides whether a sent invoice displays as overdue.
    pub fn from_domain(invoice: &Invoice, today: NaiveDate) -> Self {
        Self {
            id: invoice.id,
            invoice_number: invoice.invoice_number.clone(),
            client_id: invoice.client_id,
            related_quote: invoice.related_quote,
            title: invoice.title.clone(),
            status: invoice.status,
            display_status: invoice.display_status(today),
            due_date: invoice.due_date,
            items: invoice.items.iter().map(LineItemDto::from).collect(),
            tax: TaxConfigDto::from(&invoice.tax),
            totals: TaxBreakdownDto::from(invoice.totals),
            notes: invoice.notes.clone(),
            sent_at: invoice.sent_at,
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInvoicesParams {
    pub client_id: Option<ClientId>,
    pub status: Option<InvoiceStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<ListInvoicesParams> for InvoiceQuery {
    fn from(params: ListInvoicesParams) -> Self {
        InvoiceQuery {
            client_id: params.client_id,
            status: params.status,
            limit: params.limit,
            offset: params.offset,
        }
    }
}

// ============================================================
// Service catalog
// ============================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub billing: BillingType,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemResponse {
    pub id: CatalogItemId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub billing: BillingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CatalogItem> for CatalogItemResponse {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            unit_price: item.unit_price,
            billing: item.billing,
            category: item.category.clone(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCatalogParams {
    pub billing: Option<BillingType>,
    pub category: Option<String>,
}

impl From<ListCatalogParams> for CatalogQuery {
    fn from(params: ListCatalogParams) -> Self {
        CatalogQuery {
            billing: params.billing,
            category: params.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn totals_flatten_to_the_editor_shape() {
        let items = vec![LineItem::new("Design", 1, dec!(1000))];
        let recurring = vec![LineItem::new("Care plan", 1, dec!(200))];
        let tax = TaxConfig::new(dec!(8.25));
        let totals = QuoteTotals::compute(&items, &recurring, &tax);

        let value = serde_json::to_value(QuoteTotalsDto::from(totals)).unwrap();
        for key in [
            "oneTimeSubtotal",
            "oneTimeTaxAmount",
            "oneTimeGrandTotal",
            "monthlySubtotal",
            "monthlyTaxAmount",
            "monthlyGrandTotal",
            "combinedTaxAmount",
            "grandTotal",
        ] {
            assert!(value.get(key).is_some(), "missing totals key {key}");
        }
    }

    #[test]
    fn draft_request_decodes_with_everything_missing() {
        let request: QuoteDraftRequest = serde_json::from_str("{}").unwrap();
        let draft = QuoteDraft::from(request);
        assert!(draft.client_id.is_none());
        assert!(draft.one_time_items.is_empty());
        assert!(!draft.tax.enabled);
    }

    #[test]
    fn line_item_input_carries_flags_through() {
        let input: LineItemInput = serde_json::from_value(serde_json::json!({
            "name": "SEO retainer",
            "quantity": 3,
            "unitPrice": "450",
            "discountPercent": "10",
            "isTaxExempt": true
        }))
        .unwrap();

        let item = LineItem::from(input);
        assert_eq!(item.name, "SEO retainer");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.discount_percent.value(), dec!(10));
        assert!(item.is_tax_exempt);
    }

    #[test]
    fn tax_input_maps_to_the_domain_config() {
        let input: TaxConfigInput = serde_json::from_value(serde_json::json!({
            "taxEnabled": true,
            "taxRatePercent": "8.25",
            "jurisdictionExemptionEnabled": true
        }))
        .unwrap();

        let tax = TaxConfig::from(input);
        assert!(tax.enabled);
        assert_eq!(tax.rate_percent.value(), dec!(8.25));
        assert!(tax.data_processing_exemption);
    }
}
