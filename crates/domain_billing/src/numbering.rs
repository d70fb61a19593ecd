//! Sequential document numbers
//!
//! Quotes and invoices carry human-readable numbers like `Q-007` and
//! `INV-012`. The next number is derived from the highest existing one
//! by incrementing its trailing digit run; anything that cannot be
//! read that way falls back to the first number rather than blocking
//! document creation.
//!
//! Derivation from a snapshot is inherently racy: two creations that
//! read the same maximum will mint the same number. See
//! [`NumberingMode`] for the stricter alternative.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for quote numbers
pub const QUOTE_PREFIX: &str = "Q";
/// Prefix for invoice numbers
pub const INVOICE_PREFIX: &str = "INV";

/// The kind of numbered document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Quote,
    Invoice,
}

impl DocumentKind {
    /// The prefix this kind's numbers carry
    pub fn number_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Quote => QUOTE_PREFIX,
            DocumentKind::Invoice => INVOICE_PREFIX,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Quote => f.write_str("quote"),
            DocumentKind::Invoice => f.write_str("invoice"),
        }
    }
}

/// How new document numbers are allocated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingMode {
    /// Read the highest existing number and increment it.
    ///
    /// Two concurrent creations can read the same snapshot and mint a
    /// duplicate number. Accepted for a single-admin back office and
    /// kept as the default because it works against any store.
    #[default]
    SnapshotMax,
    /// Ask the store for an atomically reserved sequence value.
    ///
    /// Duplicate-free, same output format, but requires a store that
    /// can reserve counters.
    StoreReserved,
}

/// The first number of a sequence, e.g. `Q-001`.
pub fn first_number(prefix: &str) -> String {
    format_number(prefix, 1)
}

/// Formats a sequence value, zero-padded to three digits.
///
/// Values of 1000 and above simply widen.
pub fn format_number(prefix: &str, value: u64) -> String {
    format!("{prefix}-{value:03}")
}

/// Derives the next number from the highest existing one.
///
/// `None` (no documents yet) and unparsable values both yield the
/// first number; a numbering hiccup must never block creation, at the
/// cost of a possible duplicate.
pub fn next_number(current_max: Option<&str>, prefix: &str) -> String {
    let next = current_max
        .and_then(trailing_number)
        .and_then(|n| n.checked_add(1));
    match next {
        Some(value) => format_number(prefix, value),
        None => first_number(prefix),
    }
}

/// Extracts the trailing digit run of a document number.
///
/// `"Q-009"` yields 9, `"INV-1041"` yields 1041. Returns `None` when
/// the value ends in no digits or the run overflows.
pub fn trailing_number(value: &str) -> Option<u64> {
    let digits: usize = value
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    value[value.len() - digits..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_document_of_a_kind() {
        assert_eq!(next_number(None, "Q"), "Q-001");
        assert_eq!(next_number(None, "INV"), "INV-001");
    }

    #[test]
    fn increments_and_pads() {
        assert_eq!(next_number(Some("Q-009"), "Q"), "Q-010");
        assert_eq!(next_number(Some("Q-099"), "Q"), "Q-100");
        assert_eq!(next_number(Some("INV-041"), "INV"), "INV-042");
    }

    #[test]
    fn four_digit_numbers_widen_without_truncation() {
        assert_eq!(next_number(Some("Q-999"), "Q"), "Q-1000");
        assert_eq!(next_number(Some("Q-1041"), "Q"), "Q-1042");
    }

    #[test]
    fn garbage_falls_back_to_first_number() {
        assert_eq!(next_number(Some("garbage"), "Q"), "Q-001");
        assert_eq!(next_number(Some(""), "Q"), "Q-001");
        assert_eq!(next_number(Some("Q-"), "Q"), "Q-001");
    }

    #[test]
    fn only_the_trailing_run_matters() {
        // A stray prefix does not confuse the parse.
        assert_eq!(next_number(Some("OLD-Q-007"), "Q"), "Q-008");
        assert_eq!(next_number(Some("12-deluxe-3"), "Q"), "Q-004");
    }

    #[test]
    fn leading_zeros_in_the_run_are_fine() {
        assert_eq!(next_number(Some("Q-0009"), "Q"), "Q-010");
    }

    #[test]
    fn absurdly_long_runs_fall_back() {
        let huge = format!("Q-{}", "9".repeat(30));
        assert_eq!(next_number(Some(&huge), "Q"), "Q-001");
    }

    #[test]
    fn same_snapshot_mints_the_same_number() {
        // Two creations racing on the same maximum both get Q-006;
        // SnapshotMax mode accepts this.
        let snapshot = Some("Q-005");
        let first = next_number(snapshot, "Q");
        let second = next_number(snapshot, "Q");
        assert_eq!(first, "Q-006");
        assert_eq!(second, "Q-006");
    }

    #[test]
    fn trailing_number_extraction() {
        assert_eq!(trailing_number("Q-007"), Some(7));
        assert_eq!(trailing_number("INV-1041"), Some(1041));
        assert_eq!(trailing_number("007"), Some(7));
        assert_eq!(trailing_number("Q-"), None);
        assert_eq!(trailing_number(""), None);
        assert_eq!(trailing_number("Q-12a"), None);
    }

    #[test]
    fn kind_prefixes() {
        assert_eq!(DocumentKind::Quote.number_prefix(), "Q");
        assert_eq!(DocumentKind::Invoice.number_prefix(), "INV");
    }
}
