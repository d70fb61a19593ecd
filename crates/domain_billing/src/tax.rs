//! Sales-tax aggregation over line items
//!
//! Reduces a list of line items and a tax policy into the four figures
//! every document carries: subtotal, taxable base, tax, and grand
//! total. Texas treats data-processing services as only 80% taxable
//! (Tex. Tax Code §151.351), so when that carve-out is switched on,
//! each taxable row contributes 80% of its post-discount total to the
//! taxable base. The carve-out applies to every taxable row alike; it
//! is not tracked per service category.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{round2, Percent};

use crate::line_item::LineItem;

/// Share of a taxable charge that enters the taxable base when the
/// data-processing carve-out applies.
pub const DATA_PROCESSING_TAXABLE_SHARE: Decimal = dec!(0.80);

/// Per-document tax policy, copied into the document at save time.
///
/// A value, not a reference: editing the site-wide defaults later must
/// not change the figures on documents already saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Whether tax is charged at all
    pub enabled: bool,
    /// Tax rate, e.g. 8.25 for Texas state plus local
    pub rate_percent: Percent,
    /// Apply the 20% data-processing carve-out to taxable rows
    pub data_processing_exemption: bool,
}

impl TaxConfig {
    /// Tax charged at the given rate, no carve-out
    pub fn new(rate_percent: Decimal) -> Self {
        Self {
            enabled: true,
            rate_percent: Percent::new(rate_percent),
            data_processing_exemption: false,
        }
    }

    /// No tax charged
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            rate_percent: Percent::ZERO,
            data_processing_exemption: false,
        }
    }

    /// Switches on the data-processing carve-out
    pub fn with_data_processing_exemption(mut self) -> Self {
        self.data_processing_exemption = true;
        self
    }

    fn taxable_share(&self) -> Decimal {
        if self.data_processing_exemption {
            DATA_PROCESSING_TAXABLE_SHARE
        } else {
            Decimal::ONE
        }
    }
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

/// The derived tax figures for one item collection
///
/// Recomputed from the items on every read; persisted alongside them
/// only so the store shows the same numbers the editor did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Sum of post-discount row totals, pre-tax
    pub subtotal: Decimal,
    /// Portion of the subtotal subject to tax after exemptions
    pub taxable_amount: Decimal,
    /// Tax charged on the taxable amount
    pub tax_amount: Decimal,
    /// Subtotal plus tax
    pub grand_total: Decimal,
}

impl TaxBreakdown {
    /// All-zero figures, the result for an empty item list
    pub const ZERO: TaxBreakdown = TaxBreakdown {
        subtotal: Decimal::ZERO,
        taxable_amount: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        grand_total: Decimal::ZERO,
    };
}

/// Computes the tax figures for a collection of line items.
///
/// Row totals are recomputed from their raw fields first; a stale
/// stored `total` never leaks into the aggregate. Exempt rows and rows
/// under a disabled tax policy still count toward the subtotal, they
/// just contribute nothing to the taxable base.
///
/// Deterministic: identical inputs produce identical figures, which is
/// what lets the editor preview and the persisted record agree.
pub fn compute_tax(items: &[LineItem], config: &TaxConfig) -> TaxBreakdown {
    let share = config.taxable_share();
    let mut subtotal_raw = Decimal::ZERO;
    let mut taxable_raw = Decimal::ZERO;

    for item in items {
        let total = item.computed_total();
        subtotal_raw += total;
        if config.enabled && !item.is_tax_exempt {
            taxable_raw += total * share;
        }
    }

    let subtotal = round2(subtotal_raw);
    let taxable_amount = round2(taxable_raw);
    let tax_amount = if config.enabled {
        round2(taxable_amount * config.rate_percent.as_fraction())
    } else {
        Decimal::ZERO
    };
    let grand_total = round2(subtotal + tax_amount);

    TaxBreakdown {
        subtotal,
        taxable_amount,
        tax_amount,
        grand_total,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_item() -> impl Strategy<Value = LineItem> {
        (
            0i64..5_000_00i64,
            1i64..50i64,
            0i64..100_00i64,
            any::<bool>(),
        )
            .prop_map(|(price_cents, qty, discount_bp, exempt)| {
                let mut item = LineItem::new("row", qty, Decimal::new(price_cents, 2))
                    .with_discount(Decimal::new(discount_bp, 2));
                item.is_tax_exempt = exempt;
                item
            })
    }

    fn arb_config() -> impl Strategy<Value = TaxConfig> {
        (any::<bool>(), 0i64..100_00i64, any::<bool>()).prop_map(
            |(enabled, rate_bp, carve_out)| TaxConfig {
                enabled,
                rate_percent: Percent::new(Decimal::new(rate_bp, 2)),
                data_processing_exemption: carve_out,
            },
        )
    }

    proptest! {
        #[test]
        fn aggregation_is_deterministic(
            items in proptest::collection::vec(arb_item(), 0..12),
            config in arb_config()
        ) {
            let first = compute_tax(&items, &config);
            let second = compute_tax(&items, &config);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn exempt_items_never_enter_the_taxable_base(
            items in proptest::collection::vec(arb_item(), 0..12),
            config in arb_config()
        ) {
            let taxable_only: Vec<LineItem> = items
                .iter()
                .filter(|i| !i.is_tax_exempt)
                .cloned()
                .collect();
            let all = compute_tax(&items, &config);
            let without_exempt = compute_tax(&taxable_only, &config);
            prop_assert_eq!(all.taxable_amount, without_exempt.taxable_amount);
            prop_assert_eq!(all.tax_amount, without_exempt.tax_amount);
        }

        #[test]
        fn carve_out_taxable_base_is_eighty_percent_of_subtotal(
            items in proptest::collection::vec(
                (1i64..5_000_00i64, 1i64..20i64)
                    .prop_map(|(p, q)| LineItem::new("row", q, Decimal::new(p, 2))),
                1..12
            )
        ) {
            // All rows taxable, carve-out on: base is exactly 80% of
            // the subtotal, rounded once.
            let config = TaxConfig::new(dec!(8.25)).with_data_processing_exemption();
            let result = compute_tax(&items, &config);
            prop_assert_eq!(
                result.taxable_amount,
                round2(result.subtotal * DATA_PROCESSING_TAXABLE_SHARE)
            );
        }

        #[test]
        fn grand_total_is_subtotal_plus_tax(
            items in proptest::collection::vec(arb_item(), 0..12),
            config in arb_config()
        ) {
            let result = compute_tax(&items, &config);
            prop_assert_eq!(result.grand_total, result.subtotal + result.tax_amount);
        }

        #[test]
        fn disabled_tax_means_zero_tax(
            items in proptest::collection::vec(arb_item(), 0..12)
        ) {
            let config = TaxConfig::disabled();
            let result = compute_tax(&items, &config);
            prop_assert_eq!(result.tax_amount, Decimal::ZERO);
            prop_assert_eq!(result.taxable_amount, Decimal::ZERO);
            prop_assert_eq!(result.grand_total, result.subtotal);
        }
    }
}
