//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::round2;
use domain_billing::{QuoteTotals, TaxBreakdown, ValidationIssue};
use rust_decimal::Decimal;

/// Asserts that a decimal value is approximately equal to another
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a decimal value is within a range
pub fn assert_decimal_in_range(value: Decimal, min: Decimal, max: Decimal) {
    assert!(
        value >= min && value <= max,
        "Decimal {} is not in range [{}, {}]",
        value,
        min,
        max
    );
}

/// Asserts that a monetary amount carries no sub-cent component
pub fn assert_two_decimal_places(value: Decimal) {
    assert!(
        value == round2(value),
        "Amount {} carries a sub-cent component",
        value
    );
}

/// Asserts the internal arithmetic of a tax breakdown
///
/// # Panics
///
/// Panics if any figure is negative or sub-cent, if the taxable base
/// exceeds the subtotal, or if the grand total is not subtotal + tax.
pub fn assert_breakdown_consistent(breakdown: &TaxBreakdown) {
    for (label, figure) in [
        ("subtotal", breakdown.subtotal),
        ("taxable_amount", breakdown.taxable_amount),
        ("tax_amount", breakdown.tax_amount),
        ("grand_total", breakdown.grand_total),
    ] {
        assert!(
            figure >= Decimal::ZERO,
            "Breakdown {} is negative: {}",
            label,
            figure
        );
        assert!(
            figure == round2(figure),
            "Breakdown {} carries a sub-cent component: {}",
            label,
            figure
        );
    }

    assert!(
        breakdown.taxable_amount <= breakdown.subtotal,
        "Taxable base {} exceeds subtotal {}",
        breakdown.taxable_amount,
        breakdown.subtotal
    );
    assert_eq!(
        breakdown.grand_total,
        breakdown.subtotal + breakdown.tax_amount,
        "Grand total {} is not subtotal {} plus tax {}",
        breakdown.grand_total,
        breakdown.subtotal,
        breakdown.tax_amount
    );
}

/// Asserts the internal arithmetic of a quote's paired aggregates
pub fn assert_totals_consistent(totals: &QuoteTotals) {
    assert_breakdown_consistent(&totals.one_time);
    assert_breakdown_consistent(&totals.monthly);

    assert_eq!(
        totals.combined_tax_amount,
        totals.one_time.tax_amount + totals.monthly.tax_amount,
        "Combined tax {} is not the sum of both collections",
        totals.combined_tax_amount
    );
    assert_eq!(
        totals.grand_total, totals.one_time.grand_total,
        "Headline grand total {} strayed from the one-time figure {}",
        totals.grand_total, totals.one_time.grand_total
    );
}

/// Asserts that a rejection lists an issue mentioning the given text
pub fn assert_has_issue(issues: &[ValidationIssue], needle: &str) {
    assert!(
        issues.iter().any(|issue| issue.message.contains(needle)),
        "No issue mentions {:?}; issues were: {:?}",
        needle,
        issues.iter().map(|i| &i.message).collect::<Vec<_>>()
    );
}

/// Asserts that a rejection lists an issue against the given field
pub fn assert_has_field_issue(issues: &[ValidationIssue], field: &str) {
    assert!(
        issues
            .iter()
            .any(|issue| issue.field.as_deref() == Some(field)),
        "No issue targets field {:?}; issues were: {:?}",
        field,
        issues
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
