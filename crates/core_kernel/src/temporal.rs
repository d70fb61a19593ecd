//! Business-calendar helpers
//!
//! Due dates and quote expiry are calendar dates, and "past due" means
//! past due in the agency's home timezone (US Central). Comparing
//! against the UTC date instead would flip an invoice to overdue at
//! 6pm local time, so every derived date check goes through
//! [`business_date`] / [`business_today`].

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::Chicago;
use chrono_tz::Tz;

/// The agency's home timezone.
pub const BUSINESS_TZ: Tz = Chicago;

/// Converts an instant to the business-local calendar date.
pub fn business_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&BUSINESS_TZ).date_naive()
}

/// Today's date in the business timezone.
pub fn business_today() -> NaiveDate {
    business_date(Utc::now())
}

/// Whole days `date` lies in the past relative to `today`.
///
/// Returns 0 when the date is today or in the future; used for the
/// "N days overdue" label, never for state decisions.
pub fn days_past(date: NaiveDate, today: NaiveDate) -> i64 {
    (today - date).num_days().max(0)
}
