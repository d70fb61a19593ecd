//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random billing data
//! that maintains domain invariants.

use core_kernel::{ClientId, InvoiceId, Percent, QuoteId};
use domain_billing::{BillingType, LineItem, QuoteDraft, QuoteTotals, TaxConfig};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::TemporalFixtures;

/// Strategy for generating unit prices with two decimal places
pub fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..5_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating row quantities
pub fn quantity_strategy() -> impl Strategy<Value = i64> {
    1i64..500i64
}

/// Strategy for generating percentage discounts (0% to 100%)
pub fn discount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|bp| Decimal::new(bp, 2))
}

/// Strategy for generating plausible sales-tax rates (0% to 25%)
pub fn tax_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..2_500i64).prop_map(|bp| Decimal::new(bp, 2))
}

/// Strategy for generating billing types
pub fn billing_type_strategy() -> impl Strategy<Value = BillingType> {
    prop_oneof![
        Just(BillingType::OneTime),
        Just(BillingType::Monthly),
        Just(BillingType::Annual),
    ]
}

/// Strategy for generating row labels
pub fn item_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,12}( [a-z]{2,10})?".prop_map(|s| s)
}

/// Strategy for generating single line items, exemption included
pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    (
        item_name_strategy(),
        quantity_strategy(),
        price_strategy(),
        discount_strategy(),
        any::<bool>(),
    )
        .prop_map(|(name, quantity, price, discount, exempt)| {
            let mut item = LineItem::new(name, quantity, price).with_discount(discount);
            item.is_tax_exempt = exempt;
            item
        })
}

/// Strategy for generating item collections of up to `max` rows
pub fn line_items_strategy(max: usize) -> impl Strategy<Value = Vec<LineItem>> {
    proptest::collection::vec(line_item_strategy(), 0..max)
}

/// Strategy for generating tax policies, disabled ones included
pub fn tax_config_strategy() -> impl Strategy<Value = TaxConfig> {
    (any::<bool>(), tax_rate_strategy(), any::<bool>()).prop_map(|(enabled, rate, carve_out)| {
        TaxConfig {
            enabled,
            rate_percent: Percent::new(rate),
            data_processing_exemption: carve_out,
        }
    })
}

/// Strategy for generating saveable quote drafts
pub fn quote_draft_strategy() -> impl Strategy<Value = QuoteDraft> {
    (
        line_items_strategy(8),
        line_items_strategy(4),
        tax_config_strategy(),
    )
        .prop_filter("drafts need at least one row", |(one_time, recurring, _)| {
            !one_time.is_empty() || !recurring.is_empty()
        })
        .prop_map(|(one_time_items, recurring_items, tax)| QuoteDraft {
            client_id: Some(ClientId::new()),
            title: None,
            valid_until: Some(TemporalFixtures::valid_until()),
            tax,
            one_time_items,
            recurring_items,
            notes: None,
        })
}

/// Strategy for generating ClientId
pub fn client_id_strategy() -> impl Strategy<Value = ClientId> {
    any::<[u8; 16]>().prop_map(|bytes| ClientId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating QuoteId
pub fn quote_id_strategy() -> impl Strategy<Value = QuoteId> {
    any::<[u8; 16]>().prop_map(|bytes| QuoteId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating InvoiceId
pub fn invoice_id_strategy() -> impl Strategy<Value = InvoiceId> {
    any::<[u8; 16]>().prop_map(|bytes| InvoiceId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating valid email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{5,10}", "[a-z]{3,8}").prop_map(|(local, domain)| format!("{}@{}.com", local, domain))
}
