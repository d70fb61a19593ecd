//! Line items and the per-item total calculation
//!
//! A line item is one billable row: quantity, unit price, an optional
//! percentage discount, and a tax-exemption flag. The stored `total`
//! field exists so the document store holds the same figures the
//! editor showed, but it is never read back as truth; every
//! computation starts from [`item_total`] on the raw fields.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{round2, LineItemKey, Percent};

/// Computes a single item's post-discount total.
///
/// Inputs are clamped rather than rejected: a quantity below 1 counts
/// as 1, a negative unit price as 0, and the discount is held to
/// [0, 100]. The result carries at most two decimal places.
pub fn item_total(unit_price: Decimal, quantity: i64, discount_percent: Decimal) -> Decimal {
    let unit_price = unit_price.max(Decimal::ZERO);
    let quantity = Decimal::from(quantity.max(1));
    let discount = Percent::new(discount_percent).as_fraction();
    round2(unit_price * quantity * (Decimal::ONE - discount))
}

/// One billable row on a quote or invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable identity used by editors to track rows across edits
    pub key: LineItemKey,
    /// Display label
    pub name: String,
    /// Optional free-form detail shown under the name
    #[serde(default)]
    pub description: Option<String>,
    /// Number of units, at least 1
    pub quantity: i64,
    /// Price per unit in dollars
    pub unit_price: Decimal,
    /// Percentage discount applied to this row
    #[serde(default)]
    pub discount_percent: Percent,
    /// Excludes this row from the taxable base when set
    #[serde(default)]
    pub is_tax_exempt: bool,
    /// Stored copy of the computed total. Never authoritative: always
    /// recomputed from the fields above before use.
    #[serde(default)]
    pub total: Decimal,
}

impl LineItem {
    /// Creates a line item with no discount and no exemption
    pub fn new(name: impl Into<String>, quantity: i64, unit_price: Decimal) -> Self {
        let mut item = Self {
            key: LineItemKey::new(),
            name: name.into(),
            description: None,
            quantity,
            unit_price,
            discount_percent: Percent::ZERO,
            is_tax_exempt: false,
            total: Decimal::ZERO,
        };
        item.refresh_total();
        item
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the percentage discount
    pub fn with_discount(mut self, percent: Decimal) -> Self {
        self.discount_percent = Percent::new(percent);
        self.refresh_total();
        self
    }

    /// Marks this row as exempt from tax
    pub fn tax_exempt(mut self) -> Self {
        self.is_tax_exempt = true;
        self
    }

    /// The row total derived from the current fields
    pub fn computed_total(&self) -> Decimal {
        item_total(self.unit_price, self.quantity, self.discount_percent.value())
    }

    /// Writes the derived total back into the stored field
    pub fn refresh_total(&mut self) {
        self.total = self.computed_total();
    }
}

/// Refreshes the stored total on every item in a collection.
///
/// Called by the composers before aggregation so the persisted rows
/// carry the same figures the aggregate was built from.
pub fn refresh_totals(items: &mut [LineItem]) {
    for item in items {
        item.refresh_total();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn plain_total_is_price_times_quantity() {
        assert_eq!(item_total(dec!(100), 2, dec!(0)), dec!(200.00));
        assert_eq!(item_total(dec!(59.99), 3, dec!(0)), dec!(179.97));
    }

    #[test]
    fn discount_reduces_total() {
        // 100 * 2 * 0.90 = 180
        assert_eq!(item_total(dec!(100), 2, dec!(10)), dec!(180.00));
        // Full discount zeroes the row.
        assert_eq!(item_total(dec!(100), 2, dec!(100)), dec!(0.00));
    }

    #[test]
    fn sub_cent_results_are_rounded_half_away() {
        // 10.99 * 3 * 0.885 = 29.17845 -> 29.18
        assert_eq!(item_total(dec!(10.99), 3, dec!(11.5)), dec!(29.18));
    }

    #[test]
    fn non_positive_quantity_clamps_to_one() {
        assert_eq!(item_total(dec!(50), 0, dec!(0)), dec!(50.00));
        assert_eq!(item_total(dec!(50), -3, dec!(0)), dec!(50.00));
    }

    #[test]
    fn negative_price_clamps_to_zero() {
        assert_eq!(item_total(dec!(-50), 2, dec!(0)), dec!(0.00));
    }

    #[test]
    fn out_of_range_discount_clamps() {
        assert_eq!(item_total(dec!(100), 1, dec!(-20)), dec!(100.00));
        assert_eq!(item_total(dec!(100), 1, dec!(250)), dec!(0.00));
    }

    #[test]
    fn refresh_total_overwrites_stale_value() {
        let mut item = LineItem::new("Site build", 1, dec!(2500));
        item.total = dec!(999999);
        item.refresh_total();
        assert_eq!(item.total, dec!(2500.00));
    }

    #[test]
    fn stored_total_is_ignored_by_computed_total() {
        let mut item = LineItem::new("Hosting", 12, dec!(25)).with_discount(dec!(50));
        item.total = dec!(0.01);
        assert_eq!(item.computed_total(), dec!(150.00));
    }

    #[test]
    fn builder_style_constructors_populate_total() {
        let item = LineItem::new("Logo design", 1, dec!(800)).with_discount(dec!(25));
        assert_eq!(item.total, dec!(600.00));
        assert!(!item.is_tax_exempt);

        let exempt = LineItem::new("Consulting", 2, dec!(150)).tax_exempt();
        assert!(exempt.is_tax_exempt);
        assert_eq!(exempt.total, dec!(300.00));
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let json = format!(
            r#"{{"key":"{}","name":"Ad spend","quantity":2,"unit_price":"75.50"}}"#,
            uuid::Uuid::new_v4()
        );
        let item: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item.discount_percent, Percent::ZERO);
        assert!(!item.is_tax_exempt);
        // Stored total defaults to zero until refreshed.
        assert_eq!(item.total, Decimal::ZERO);
        assert_eq!(item.computed_total(), dec!(151.00));
    }
}
