//! Monetary rounding and percentage primitives
//!
//! All billing math runs on `rust_decimal::Decimal`: exact base-10
//! arithmetic, so repeated additions never accumulate binary float
//! drift. Amounts are US dollars with two-decimal presentation.
//!
//! Every monetary output passes through [`round2`] exactly once, at the
//! point where it is computed. Values read back from the store are not
//! re-rounded; they are recomputed from their inputs instead.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Rounds to 2 decimal places, half away from zero.
///
/// `2.345 -> 2.35`, `-2.345 -> -2.35`. This matches how the invoices
/// have always been totalled; switching to banker's rounding would
/// change persisted grand totals by a cent.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a dollar amount for logs and plain-text output.
pub fn format_usd(amount: Decimal) -> String {
    if amount.is_sign_negative() {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

/// A percentage clamped to `[0, 100]`.
///
/// Construction clamps rather than fails: callers hand us whatever the
/// editor or the store contained, and an out-of-range rate must never
/// panic a totals recomputation. Deserialization goes through the same
/// clamp, so a `Percent` is in range by construction everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    /// Creates a percentage, clamping the value into `[0, 100]`.
    pub fn new(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, dec!(100)))
    }

    /// Returns the percentage value (e.g. `8.25` for 8.25%).
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the multiplier form (e.g. `0.0825` for 8.25%).
    pub fn as_fraction(&self) -> Decimal {
        self.0 / dec!(100)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::ZERO
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

impl From<Decimal> for Percent {
    fn from(value: Decimal) -> Self {
        Percent::new(value)
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer).map(Percent::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_half_goes_away_from_zero() {
        assert_eq!(round2(dec!(2.345)), dec!(2.35));
        assert_eq!(round2(dec!(2.344)), dec!(2.34));
        assert_eq!(round2(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round2(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn round2_keeps_already_rounded_values() {
        assert_eq!(round2(dec!(180.00)), dec!(180.00));
        assert_eq!(round2(dec!(0)), dec!(0));
    }

    #[test]
    fn percent_clamps_out_of_range_values() {
        assert_eq!(Percent::new(dec!(-5)).value(), dec!(0));
        assert_eq!(Percent::new(dec!(150)).value(), dec!(100));
        assert_eq!(Percent::new(dec!(8.25)).value(), dec!(8.25));
    }

    #[test]
    fn percent_fraction() {
        assert_eq!(Percent::new(dec!(8.25)).as_fraction(), dec!(0.0825));
        assert_eq!(Percent::new(dec!(100)).as_fraction(), dec!(1));
    }

    #[test]
    fn percent_deserialization_clamps() {
        let pct: Percent = serde_json::from_str("250").unwrap();
        assert_eq!(pct.value(), dec!(100));
        let pct: Percent = serde_json::from_str("\"-3.5\"").unwrap();
        assert_eq!(pct.value(), dec!(0));
    }

    #[test]
    fn format_usd_output() {
        assert_eq!(format_usd(dec!(191.88)), "$191.88");
        assert_eq!(format_usd(dec!(5)), "$5.00");
        assert_eq!(format_usd(dec!(-12.5)), "-$12.50");
    }
}
