//! Catalog of billable services
//!
//! Catalog items are templates for line items. Inserting one into a
//! quote or invoice copies its fields once; later edits to the catalog
//! never reach documents that were built from it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::CatalogItemId;

use crate::line_item::LineItem;

/// How a catalog item bills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingType {
    /// Charged once
    OneTime,
    /// Charged every month
    Monthly,
    /// Charged every year
    Annual,
}

impl BillingType {
    /// True for items that land in a quote's recurring collection
    pub fn is_recurring(&self) -> bool {
        matches!(self, BillingType::Monthly | BillingType::Annual)
    }
}

impl fmt::Display for BillingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillingType::OneTime => "one-time",
            BillingType::Monthly => "monthly",
            BillingType::Annual => "annual",
        };
        f.write_str(label)
    }
}

/// A reusable template for a billable row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique identifier
    pub id: CatalogItemId,
    /// Display name
    pub name: String,
    /// Optional detail copied into the line item
    #[serde(default)]
    pub description: Option<String>,
    /// Default price per unit in dollars
    pub unit_price: Decimal,
    /// Billing cadence
    pub billing: BillingType,
    /// Free-form grouping label, e.g. "web" or "marketing"
    #[serde(default)]
    pub category: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Creates a catalog item
    pub fn new(name: impl Into<String>, unit_price: Decimal, billing: BillingType) -> Self {
        let now = Utc::now();
        Self {
            id: CatalogItemId::new(),
            name: name.into(),
            description: None,
            unit_price,
            billing,
            category: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category label
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Copies this template into a fresh line item.
    ///
    /// Quantity starts at 1, no discount, not exempt. The line item
    /// keeps no link back to the catalog.
    pub fn to_line_item(&self) -> LineItem {
        let mut item = LineItem::new(self.name.clone(), 1, self.unit_price);
        item.description = self.description.clone();
        item.refresh_total();
        item
    }
}
